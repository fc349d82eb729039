mod cli;

use clap::Parser;
use cli::setup::Cli;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Log level:
/// 1. `--verbose` sets DEBUG
/// 2. otherwise `RUST_LOG`, if set
/// 3. otherwise WARN
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("basket=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("basket=warn"))
    };

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    tracing::debug!("basket starting with args: {:?}", cli);

    if let Err(e) = cli::run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
