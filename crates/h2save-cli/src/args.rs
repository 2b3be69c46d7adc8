use crate::types::{FormatArg, LogFormatArg, LogLevel};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "h2save")]
#[command(about = "Expand Hades II savefiles into text, JSON, or a browsable tree", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Config file (defaults to $H2SAVE_CONFIG, then the user config directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[arg(long, global = true)]
    pub log_level: Option<LogLevel>,

    #[arg(long, default_value = "compact", global = true)]
    pub log_format: LogFormatArg,

    /// Write logs to this file instead of stderr
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Browse a savefile interactively (default)")]
    Open {
        /// Savefile to select on startup
        file: Option<PathBuf>,

        /// Directory downloads are written to
        #[arg(long)]
        out_dir: Option<PathBuf>,
    },

    #[command(about = "Expand a savefile once and deliver the result")]
    Expand {
        file: PathBuf,

        #[arg(long, short, default_value = "text")]
        format: FormatArg,

        /// Directory downloads are written to
        #[arg(long)]
        out_dir: Option<PathBuf>,
    },

    #[command(about = "Show a savefile header without decoding the lua state")]
    Inspect {
        file: PathBuf,

        /// Also decode the lua state and count its values
        #[arg(long)]
        stats: bool,
    },

    #[command(about = "List savefiles in the detected save directory")]
    Saves {
        /// Directory to list instead of the detected one
        #[arg(long)]
        dir: Option<PathBuf>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_expand_parses_format() {
        let cli = Cli::parse_from(["h2save", "expand", "Profile1.sav", "--format", "json-pretty"]);
        match cli.command {
            Some(Commands::Expand { file, format, out_dir }) => {
                assert_eq!(file, PathBuf::from("Profile1.sav"));
                assert_eq!(format, FormatArg::JsonPretty);
                assert_eq!(out_dir, None);
            }
            _ => panic!("expected expand"),
        }
    }

    #[test]
    fn test_no_subcommand_defaults_to_none() {
        let cli = Cli::parse_from(["h2save", "--log-level", "debug"]);
        assert!(cli.command.is_none());
        assert_eq!(cli.log_level, Some(LogLevel::Debug));
    }
}
