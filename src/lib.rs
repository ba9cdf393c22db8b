pub mod analysis;
pub mod config;
pub mod error;
pub mod model;
pub mod reader;
pub mod schema;
pub mod table;
