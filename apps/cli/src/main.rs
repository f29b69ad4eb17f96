use clap::Parser;
use std::process::ExitCode;
use vocab_cli::cli::Cli;

fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    vocab_cli::init_tracing();

    let cli = Cli::parse();
    match vocab_cli::run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
