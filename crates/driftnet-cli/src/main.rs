//! Binary entrypoint for the Driftnet search CLI.

use std::process;

use clap::Parser;

mod cli;
mod output;

use cli::{Cli, run};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(err) = run(cli).await {
        eprintln!("error: {}", err.display_message());
        process::exit(err.exit_code());
    }
}
