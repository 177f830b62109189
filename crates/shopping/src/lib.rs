mod aggregator;
mod command;
mod render;
mod repository;

pub use aggregator::*;
pub use command::*;
pub use render::*;
pub use repository::*;
