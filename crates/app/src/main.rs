//! Lectern Application CLI

use std::process;

use clap::Parser;
use lectern_app::observability;

mod cli;

#[tokio::main]
pub async fn main() {
    let _env = dotenvy::dotenv();

    let cli = cli::Cli::parse();

    if let Err(error) = observability::init_logging(&cli.logging) {
        eprintln!("failed to initialise logging: {error}");
        process::exit(1);
    }

    match cli.run().await {
        Ok(output) => println!("{output}"),
        Err(error) => {
            eprintln!("{error}");
            process::exit(1);
        }
    }
}
