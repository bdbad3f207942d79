//! Boat inventory CLI.

use std::io::{self, IsTerminal};

use clap::{ColorChoice, Parser};
use tracing::debug;
use tracing::level_filters::LevelFilter;

use inv_cli::cli::{Cli, LogFormatArg, LogLevelArg};
use inv_cli::commands::{Session, run};
use inv_cli::logging::{LogConfig, LogFormat, init_logging};
use inv_cli::settings::Settings;
use inv_core::Inventory;
use inv_persistence::{FileStore, KeyValueStore};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }

    let config_path = cli.config.clone().unwrap_or_else(Settings::config_path);
    let settings = Settings::load_from(&config_path);
    let data_dir = cli
        .data_dir
        .clone()
        .unwrap_or_else(|| settings.storage.resolved_data_dir());
    debug!(
        config = %config_path.display(),
        data_dir = %data_dir.display(),
        "starting"
    );

    let inventory = Inventory::open(FileStore::new(&data_dir));
    let mut session = Session::new(inventory, settings, data_dir, config_path);
    let mut stdout = io::stdout().lock();
    let mut exit_code = match run(&cli.command, &mut session, &mut stdout) {
        Ok(()) => 0,
        Err(error) => {
            eprintln!("error: {error}");
            1
        }
    };
    if !warn_unsaved(&mut session.inventory) {
        exit_code = 1;
    }
    std::process::exit(exit_code);
}

/// Retry failed saves once. Returns false when changes are still unsaved.
fn warn_unsaved<S: KeyValueStore>(inventory: &mut Inventory<S>) -> bool {
    if !inventory.has_unsaved_changes() {
        return true;
    }
    match inventory.flush() {
        Ok(()) => true,
        Err(error) => {
            let keys: Vec<String> = inventory
                .unsaved_keys()
                .iter()
                .map(ToString::to_string)
                .collect();
            eprintln!(
                "warning: changes to {} were not saved: {}",
                keys.join(", "),
                error.user_message()
            );
            if let Some(suggestion) = error.suggestion() {
                eprintln!("hint: {suggestion}");
            }
            false
        }
    }
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let mut config = LogConfig {
        level_filter: cli.verbosity.tracing_level_filter(),
        ..LogConfig::default()
    };
    config.use_env_filter = !(cli.verbosity.is_present() || cli.log_level.is_some());
    if let Some(level) = cli.log_level {
        config.level_filter = match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        };
    }
    config.format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    config.log_file = cli.log_file.clone();
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
}
