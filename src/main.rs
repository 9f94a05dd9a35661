use anyhow::Result;
use clap::Parser;
use xibao::cli::{self, Cli};

fn main() -> Result<()> {
    // Parse arguments first so --help and usage errors print without log noise
    let cli = Cli::parse();

    // CLI --log-level takes precedence, then RUST_LOG, then config (applied once loaded)
    xibao::debug::init_log_bridge(cli.log_level);

    log::info!("Starting xibao {}", env!("CARGO_PKG_VERSION"));

    let result = cli::run(cli);
    log::logger().flush();

    if let Err(ref e) = result {
        eprintln!("xibao: error: {e:#}");
        std::process::exit(1);
    }
    result
}
