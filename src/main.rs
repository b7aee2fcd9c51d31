use anyhow::{Error, Result};
use clap::Parser;
use ghcnd::{
    cli::{command, Cli, Commands},
    logging,
};

#[tokio::main]
async fn main() -> Result<(), Error> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    match &cli.command {
        Commands::Daily { input, output } => match command::daily(input, output.clone()).await {
            Ok(filename) => println!("File saved to `{}`", filename),
            Err(e) => {
                eprintln!("Error: {:#}", e);
                std::process::exit(1);
            }
        },
        Commands::Elements {} => {
            for line in command::elements() {
                println!("{}", line);
            }
        }
    }

    Ok(())
}
