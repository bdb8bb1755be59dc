use std::path::Path;

use log::LevelFilter;

use crate::error::ReportError;

/// Install the global logger: stderr, plus `log_file` when given.
pub fn init_logging(level: LevelFilter, log_file: Option<&Path>) -> Result<(), ReportError> {
    let mut dispatcher = fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "{}[{}:{}][{}] {}",
                chrono::Local::now().format("[%Y-%m-%d][%H:%M:%S]"),
                record.target(),
                record
                    .line()
                    .map(|v| v.to_string())
                    .unwrap_or_default(),
                record.level(),
                message
            ))
        })
        .level(level)
        .chain(std::io::stderr());

    if let Some(path) = log_file {
        let file = fern::log_file(path).map_err(|e| {
            ReportError::Logging(format!("cannot open log file {}: {}", path.display(), e))
        })?;
        dispatcher = dispatcher.chain(file);
    }

    dispatcher
        .apply()
        .map_err(|e| ReportError::Logging(e.to_string()))
}
