pub mod lenient;
pub mod loader;
pub mod trace_model;
