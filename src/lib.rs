pub mod auth;
pub mod cli;
pub mod config;
pub mod db;
pub mod error;
pub mod migrate;
pub mod observability;
pub mod routes;

pub use config::Config;
pub use routes::{AppState, router};
