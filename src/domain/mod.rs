pub mod company;
pub mod query;
pub mod types;
