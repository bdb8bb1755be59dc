pub mod aggregator;
pub mod builder;
pub mod classifier;
pub mod junit;
pub mod properties;
pub mod report_model;
pub mod reporter;
pub mod timestamp;
