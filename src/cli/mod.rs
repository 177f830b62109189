mod catalog;
mod server;
mod user;

pub use catalog::*;
pub use server::*;
pub use user::*;
