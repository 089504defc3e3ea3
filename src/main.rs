mod agent;
mod app;
mod cli;
mod config;
mod consts;
mod error;
mod input;
mod interrupt;
mod launcher;
mod output;
mod session;
mod utils;

use clap::Parser;

use cli::Cli;
use error::AppError;
use utils::init_tracing;

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    if let Err(e) = app::run(cli) {
        match &e {
            // Operator-facing remediation, shown where the menu would have been
            AppError::MissingCredential { .. } => println!("{e}"),
            _ => eprintln!("{e}"),
        }
        std::process::exit(e.exit_code());
    }
}
