use std::net::SocketAddr;
use std::path::PathBuf;
use std::process::ExitCode;

use tracing::error;

use crate::cli::{BackendFlags, OutputFormat};
use crate::formatting::render_error;
use crate::settings::{apply_backend_flags, load_config};

/// Run the HTTP server until it fails or the process is stopped.
pub async fn run_serve(
    config_path: Option<PathBuf>,
    bind: Option<SocketAddr>,
    backends: BackendFlags,
) -> ExitCode {
    let config = match load_config(config_path.as_deref()) {
        Ok(cfg) => apply_backend_flags(cfg, backends),
        Err(err) => return render_error(err, OutputFormat::Pretty, None),
    };
    let bind = bind.unwrap_or(config.server.bind);

    match logocheck_lib::serve(&config, bind).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %err, "server stopped");
            render_error(err, OutputFormat::Pretty, None)
        }
    }
}
