use crate::commands::Out;
use crate::error::{ErrorType, IntoResult};
use crate::{Config, Result};
use anyhow::Context;
use std::net::SocketAddr;
use std::path::Path;

/// Creates the data directory, its subdirectories and an initial `config.json`.
///
/// # Arguments
/// - `sales_home` - The directory that will be the root of data directory, e.g. `$HOME/daily-sales`
/// - `bind` - The address the HTTP server should listen on, saved to the config file.
///
/// # Errors
/// - Returns an error if the directory is already initialized or any file operations fail.
pub async fn init(sales_home: &Path, bind: Option<SocketAddr>) -> Result<Out<()>> {
    let config = Config::create(sales_home, bind)
        .await
        .context("Unable to create the data directory and configs")
        .pub_result(ErrorType::Config)?;
    Ok(format!(
        "Successfully created the daily-sales directory at {}",
        config.root().display()
    )
    .into())
}
