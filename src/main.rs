//! virsh-ss CLI entry point

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use virsh_ss::cli::{
    app::{load_merged_config, run, EXIT_ERROR, EXIT_USAGE_ERROR},
    args::{Cli, RunOptions},
    presenter::Presenter,
};
use virsh_ss::infrastructure::XdgConfigStore;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    let presenter = Presenter::new();

    let store = match &cli.config {
        Some(path) => XdgConfigStore::explicit(path.clone()),
        None => XdgConfigStore::new(),
    };

    // Merge config
    let config = match load_merged_config(&store, cli.to_config()).await {
        Ok(config) => config,
        Err(e) => {
            presenter.error(&e.to_string());
            return ExitCode::from(EXIT_ERROR);
        }
    };

    let translation = match config.translation_config() {
        Ok(translation) => translation,
        Err(e) => {
            presenter.error(&e.to_string());
            return ExitCode::from(EXIT_USAGE_ERROR);
        }
    };

    run(RunOptions::new(&cli, &config, translation)).await
}

/// Log to stderr; RUST_LOG takes precedence over --debug
fn init_tracing(debug: bool) {
    let default = if debug { "virsh_ss=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
