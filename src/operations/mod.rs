pub mod creation;
pub mod measure;
pub mod query;
