use std::process::ExitCode;

use clap::Parser;
use console::style;

mod cli;

fn main() -> ExitCode {
    let args = cli::Cli::parse();

    cli::init_tracing(args.verbose);

    match cli::run(&args) {
        Ok(_) => ExitCode::SUCCESS,

        Err(err) => {
            tracing::debug!("Download failed: {err:?}");

            eprintln!("{} {err}", style("Error:").red().bold());

            ExitCode::from(cli::exit_code(&err))
        }
    }
}
