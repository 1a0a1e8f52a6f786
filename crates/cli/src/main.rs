//! The command line entry point. See [`query_params_cli`] for the commands.

use std::process::ExitCode;

use clap::Parser;

use query_params_cli::{run, Command};

#[derive(Debug, Parser)]
#[command(name = "query-params-cli")]
#[command(about = "Translate query strings into query descriptors")]
#[command(version)]
struct Cli {
    /// The directory holding the configuration.
    #[arg(long = "context", env = "QUERY_PARAMS_CONTEXT_PATH", default_value = ".")]
    context_path: std::path::PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    let mut stdout = std::io::stdout();
    match run(cli.command, &cli.context_path, &mut stdout).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("{error:#}");
            ExitCode::FAILURE
        }
    }
}
