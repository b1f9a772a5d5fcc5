pub mod args;
pub mod commands;
mod config;
mod error;
pub mod model;
pub mod server;
pub mod store;
mod utils;

#[cfg(test)]
mod test;

pub use config::Config;
pub use error::{Error, ErrorType, IntoResult, Result};
