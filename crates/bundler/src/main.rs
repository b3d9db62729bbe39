use std::process::ExitCode;

use clap::Parser;
use tracing::error;

use cli::app::{App, Commands};

mod cli;
mod logging;

fn main() -> ExitCode {
    logging::init();

    let app = App::parse();
    let (result, failure) = match app.cmd {
        Commands::Bundle(arg) => (cli::bundle::run(arg), 2),
        Commands::Download(arg) => (cli::download::run(arg), 1),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e:#}");
            ExitCode::from(failure)
        }
    }
}
