mod command;
mod jwt;
mod query;
pub(crate) mod repository;
mod types;

pub use command::*;
pub use jwt::*;
pub use query::*;
pub use types::*;
