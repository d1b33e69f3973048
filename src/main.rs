mod cli;
mod commands;
mod formatting;
mod settings;

use std::process::ExitCode;

use cli::Commands;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    let args = cli::parse();
    init_tracing(args.verbose);

    match args.command {
        Commands::Analyze {
            images,
            target_language,
            format,
            output,
            backends,
        } => {
            commands::run_analyze(args.config, images, target_language, format, output, backends)
                .await
        }
        Commands::Serve { bind, backends } => {
            commands::run_serve(args.config, bind, backends).await
        }
    }
}

/// Logs go to stderr; stdout is reserved for reports.
fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "logocheck=debug,logocheck_lib=debug,tower_http=debug"
    } else {
        "logocheck=info,logocheck_lib=info,tower_http=info"
    };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
