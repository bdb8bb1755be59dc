pub mod collection_model;
pub mod name_resolver;
