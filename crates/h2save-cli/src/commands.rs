use super::args::{Cli, Commands};
use super::handlers;
use crate::logging::{self, LogConfig, LogFormat};
use crate::types::LogFormatArg;
use anyhow::{Context, Result};
use h2save_runtime::Config;
use is_terminal::IsTerminal;
use tracing::Level;

pub fn run(cli: Cli) -> Result<()> {
    let config = Config::load(cli.config.as_deref())?;
    let log_config = build_log_config(&cli, &config)?;

    let command = cli.command.unwrap_or(Commands::Open {
        file: None,
        out_dir: None,
    });

    match command {
        Commands::Open { file, out_dir } => {
            logging::init_file_logging(&log_config)?;
            handlers::open::handle(&config, file, out_dir)
        }

        Commands::Expand {
            file,
            format,
            out_dir,
        } => {
            logging::init_logging(&log_config)?;
            handlers::expand::handle(&config, &file, format.into(), out_dir)
        }

        Commands::Inspect { file, stats } => {
            logging::init_logging(&log_config)?;
            handlers::inspect::handle(&file, stats)
        }

        Commands::Saves { dir } => {
            logging::init_logging(&log_config)?;
            handlers::saves::handle(&config, dir)
        }
    }
}

/// Flags override the config file; the level defaults to `warn`.
fn build_log_config(cli: &Cli, config: &Config) -> Result<LogConfig> {
    let level = match (cli.log_level, config.log.level.as_deref()) {
        (Some(level), _) => Level::from(level),
        (None, Some(level)) => level
            .parse::<Level>()
            .with_context(|| format!("Invalid log level in config: {}", level))?,
        (None, None) => Level::WARN,
    };

    let format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };

    Ok(LogConfig::default()
        .with_level(level)
        .with_format(format)
        .with_ansi(std::io::stderr().is_terminal())
        .with_log_file(cli.log_file.clone().or_else(|| config.log_file())))
}

/// Runtime for one command. Everything runs on the calling thread.
pub(crate) fn build_runtime() -> Result<tokio::runtime::Runtime> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")
}
