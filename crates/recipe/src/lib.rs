mod command;
mod query;
pub mod repository;
mod types;

pub use command::*;
pub use query::*;
pub use types::*;
