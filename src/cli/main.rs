//! Command-line interface entry point for the gradebook

mod args;
mod commands;

use args::{Cli, Command};
use clap::Parser;
use commands::report::Destination;
use commands::shell::Shell;
use gradebook::config::Config;
use gradebook::core::gradebook::Gradebook;
use gradebook::core::sample::seed_sample_data;
use logger::{
    enable_debug, enable_verbose, info, init_file_logging, set_level, verbose, warn, Level,
};
use std::io;
use std::path::{Path, PathBuf};

fn main() {
    let args = Cli::parse();

    // Load configuration once at startup and apply CLI overrides to it
    let mut config = Config::load();
    let defaults = Config::from_defaults();
    config.apply_overrides(&args.to_config_overrides());

    // CLI flag overrides config logging.level; fallback warn
    let mut level = args
        .log_level
        .map(std::convert::Into::into)
        .or_else(|| config.logging.level.parse::<Level>().ok())
        .unwrap_or(Level::Warn);

    if args.debug_flag || level == Level::Debug {
        level = Level::Debug;
        enable_debug();
    }

    let verbose = args.verbose || config.logging.verbose;
    if verbose {
        enable_verbose();
    }
    set_level(level);
    verbose!("Config file: {}", Config::get_config_file_path().display());
    verbose!("Log level: {level}");

    let config_log_path = if config.logging.file.is_empty() {
        None
    } else {
        Some(PathBuf::from(&config.logging.file))
    };
    if let Some(log_path) = args.log_file.as_ref().or(config_log_path.as_ref()) {
        start_file_logging(log_path, verbose);
    }

    match args.command {
        None | Some(Command::Shell) => {
            if let Err(e) = run_shell(&config) {
                eprintln!("✗ Console error: {e}");
                std::process::exit(1);
            }
        }
        Some(Command::Config { subcommand }) => {
            commands::config::run(subcommand, &mut config, &defaults);
        }
        Some(Command::Report {
            target,
            id,
            format,
            output,
            save,
        }) => {
            let destination = match (output, save) {
                (Some(path), _) => Destination::File(path),
                (None, true) => Destination::ReportsDir,
                (None, false) => Destination::Stdout,
            };
            commands::report::run(target, id.as_deref(), &format, destination, &config);
        }
    }
}

/// Build the gradebook described by `config` and hand it to the menu loop
fn run_shell(config: &Config) -> io::Result<()> {
    let mut book = if config.school.name.is_empty() {
        Gradebook::new()
    } else {
        Gradebook::with_school_name(&config.school.name)
    };

    if config.school.seed_sample_data {
        if let Err(e) = seed_sample_data(&mut book) {
            warn!("Sample data was only partially loaded: {e}");
        }
    }

    let stdin = io::stdin();
    let stdout = io::stdout();
    Shell::new(&mut book, stdin.lock(), stdout.lock()).run()
}

fn start_file_logging(log_path: &Path, verbose: bool) {
    if let Some(parent) = log_path.parent() {
        if !parent.as_os_str().is_empty() && std::fs::create_dir_all(parent).is_err() {
            eprintln!("✗ Failed to create log directory: {}", parent.display());
            return;
        }
    }

    let display_path = log_path.to_string_lossy();
    if init_file_logging(log_path) {
        if verbose {
            eprintln!("✓ File logging initialized at: {display_path}");
        } else {
            info!("File logging initialized at: {display_path}");
        }
    } else {
        eprintln!("✗ Failed to initialize file logging at: {display_path}");
    }
}
