//! Command line interface.

pub mod command;

use std::{path::PathBuf, time::Duration};

use clap::{ArgAction, Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};

#[derive(Parser)]
#[command(version, about, long_about = None)]
/// Contains the commands
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Convert a .dly file, or a directory of them, to parquet
    Daily {
        /// A .dly file or a directory containing .dly files
        input: PathBuf,
        /// Output file [default: ~/ghcnd-daily-<today>.parquet]
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// List the documented elements and their unit conversion
    Elements {},
}

/// Creates a spinner.
pub fn create_spinner(message: String) -> ProgressBar {
    let bar = ProgressBar::new_spinner().with_message(message);
    bar.enable_steady_tick(Duration::from_millis(100));

    bar
}

/// Creates a progress bar.
pub fn create_progress_bar(size: u64, message: String) -> ProgressBar {
    let style = ProgressStyle::with_template("[{eta_precise}] {bar:40.cyan/blue} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("##-");

    ProgressBar::new(size).with_message(message).with_style(style)
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn should_validate_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn should_parse_daily_command() {
        let cli = Cli::parse_from([
            "ghcnd",
            "-vv",
            "daily",
            "data/USC00011084.dly",
            "-o",
            "out.parquet",
        ]);

        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Daily { input, output } => {
                assert_eq!(input, PathBuf::from("data/USC00011084.dly"));
                assert_eq!(output, Some(PathBuf::from("out.parquet")));
            }
            Commands::Elements {} => panic!("expected daily command"),
        }
    }
}
