pub mod dataset;
pub mod select;
