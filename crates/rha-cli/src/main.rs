//! `rha`: exit 0 on success, 1 when `get` finds nothing, 2 on error.

use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    let matches = rha_cli::command().get_matches();

    let verbosity = matches
        .subcommand()
        .map_or(0, |(_, args)| args.get_count("verbose"));
    let fallback = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback)))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let mut stdout = std::io::stdout().lock();
    match rha_cli::run(&matches, &mut stdout).await {
        Ok(outcome) => outcome.exit_code(),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(2)
        }
    }
}
