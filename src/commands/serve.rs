//! Serve command handler.

use crate::commands::Out;
use crate::error::{ErrorType, IntoResult};
use crate::{server, Config, Result};
use std::net::SocketAddr;

/// Runs the HTTP server until it is interrupted. `bind` overrides the address from the config.
pub async fn serve(config: Config, bind: Option<SocketAddr>) -> Result<Out<()>> {
    let bind = bind.unwrap_or_else(|| config.bind_addr());
    server::run(&config, bind)
        .await
        .pub_result(ErrorType::Service)?;
    Ok("Done running the HTTP server".into())
}
