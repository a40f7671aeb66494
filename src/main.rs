mod auth;
mod cli;
mod config;
mod error;
mod launch;
mod output;
mod scm;
mod screwdriver;
mod workspace;

use std::process::ExitCode;

use clap::Parser;
use cli::Cli;
use log::info;

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::init();

    output::print_banner();

    let cli = Cli::parse();
    info!("Starting launcher");
    cli.run().await
}
