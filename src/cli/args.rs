//! CLI argument definitions for the gradebook

use clap::{builder::BoolishValueParser, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use gradebook::config::ConfigOverrides;
use logger::Level;

/// CLI log level argument
///
/// Converts to lowercase strings for config storage and to `logger::Level`
/// for runtime use.
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum LogLevelArg {
    /// Error-level logging
    Error,
    /// Warning-level logging
    Warn,
    /// Info-level logging
    Info,
    /// Debug-level logging
    Debug,
}

impl From<LogLevelArg> for Level {
    fn from(arg: LogLevelArg) -> Self {
        match arg {
            LogLevelArg::Error => Self::Error,
            LogLevelArg::Warn => Self::Warn,
            LogLevelArg::Info => Self::Info,
            LogLevelArg::Debug => Self::Debug,
        }
    }
}

impl std::fmt::Display for LogLevelArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let as_str = match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
        };
        write!(f, "{as_str}")
    }
}

/// Which report the `report` command renders
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum ReportTarget {
    /// Grade listing and GPA for one student (ID or student number)
    Student,
    /// Transcript with credits for one student (ID or student number)
    Transcript,
    /// Roster, grades and average for one course (course code)
    Course,
    /// Gradebook-wide statistics
    Stats,
}

#[derive(Debug, Subcommand)]
pub enum ConfigSubcommand {
    /// Display configuration values.
    ///
    /// If a KEY is provided, displays only that configuration value.
    /// If no KEY is provided, displays all configuration values.
    Get {
        /// Optional configuration key to display (e.g., `level`, `school_name`)
        #[arg(value_name = "KEY")]
        key: Option<String>,
    },
    /// Set a configuration value.
    Set {
        /// Configuration key to set
        #[arg(value_name = "KEY")]
        key: String,
        /// Value to set
        #[arg(value_name = "VALUE")]
        value: String,
    },
    /// Unset a configuration value.
    Unset {
        /// Configuration key to unset
        #[arg(value_name = "KEY")]
        key: String,
    },
    /// Reset configuration to defaults (requires confirmation).
    Reset,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Start the interactive menu session (the default).
    Shell,
    /// Manage configuration.
    ///
    /// If no subcommand is provided, displays all configuration values.
    Config {
        #[command(subcommand)]
        subcommand: Option<ConfigSubcommand>,
    },
    /// Render one report over the sample gradebook.
    Report {
        /// Report to render
        #[arg(value_enum, value_name = "KIND")]
        target: ReportTarget,

        /// Student ID/number or course code, depending on KIND
        #[arg(value_name = "ID")]
        id: Option<String>,

        /// Report format: text (txt) or markdown (md)
        #[arg(short, long, value_name = "FORMAT", default_value = "text")]
        format: String,

        /// Output file path (optional; prints to stdout when omitted)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Write the report into the configured reports directory
        #[arg(long, conflicts_with = "output")]
        save: bool,
    },
}

#[derive(Parser, Debug)]
#[command(
    name = "gradebook",
    about = "School gradebook: students, teachers, courses and grades",
    version = env!("CARGO_PKG_VERSION")
)]
pub struct Cli {
    /// Set the runtime log level (error|warn|info|debug). Falls back to config if omitted.
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevelArg>,

    /// Enable verbose output (runtime only)
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,

    /// Enable debug-level logging and runtime debug flag (shorthand)
    #[arg(long = "debug")]
    pub debug_flag: bool,

    /// Write runtime logs to a file
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    // --- Config overrides ---
    /// Override config logging level
    #[arg(long = "config-level", value_enum)]
    pub config_level: Option<LogLevelArg>,

    /// Override config log file path
    #[arg(long = "config-log-file", value_name = "PATH")]
    pub config_log_file: Option<PathBuf>,

    /// Override config verbose flag (true/false)
    #[arg(long = "config-verbose", value_parser = BoolishValueParser::new())]
    pub config_verbose: Option<bool>,

    /// Override the school name
    #[arg(long = "school-name", value_name = "NAME")]
    pub school_name: Option<String>,

    /// Start with an empty gradebook instead of the sample data
    #[arg(long = "no-seed")]
    pub no_seed: bool,

    /// Override config reports directory
    #[arg(long = "config-reports-dir", value_name = "DIR")]
    pub config_reports_dir: Option<PathBuf>,

    /// Override config reports directory (short form)
    #[arg(long = "reports-dir", value_name = "DIR")]
    pub reports_dir: Option<PathBuf>,

    /// Subcommand to execute; the interactive shell when omitted.
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Cli {
    /// Convert CLI flags into config overrides
    ///
    /// Short-form flags (e.g., `--reports-dir`) take precedence over long-form
    /// flags (e.g., `--config-reports-dir`) when both are provided. `None`
    /// means no override.
    pub fn to_config_overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            level: self.config_level.map(|lvl| lvl.to_string().to_lowercase()),
            file: self
                .config_log_file
                .as_ref()
                .map(|p| p.to_string_lossy().to_string()),
            verbose: self.config_verbose,
            school_name: self.school_name.clone(),
            seed_sample_data: self.no_seed.then_some(false),
            reports_dir: self
                .reports_dir
                .as_ref()
                .or(self.config_reports_dir.as_ref())
                .map(|p| p.to_string_lossy().to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bare() -> Cli {
        Cli {
            log_level: None,
            verbose: false,
            debug_flag: false,
            log_file: None,
            config_level: None,
            config_log_file: None,
            config_verbose: None,
            school_name: None,
            no_seed: false,
            config_reports_dir: None,
            reports_dir: None,
            command: None,
        }
    }

    #[test]
    fn test_log_level_display() {
        assert_eq!(LogLevelArg::Error.to_string(), "error");
        assert_eq!(LogLevelArg::Warn.to_string(), "warn");
        assert_eq!(LogLevelArg::Info.to_string(), "info");
        assert_eq!(LogLevelArg::Debug.to_string(), "debug");
    }

    #[test]
    fn test_log_level_to_logger_level() {
        assert_eq!(Level::from(LogLevelArg::Error), Level::Error);
        assert_eq!(Level::from(LogLevelArg::Warn), Level::Warn);
        assert_eq!(Level::from(LogLevelArg::Info), Level::Info);
        assert_eq!(Level::from(LogLevelArg::Debug), Level::Debug);
    }

    #[test]
    fn test_to_config_overrides_empty() {
        let overrides = bare().to_config_overrides();
        assert!(overrides.level.is_none());
        assert!(overrides.file.is_none());
        assert!(overrides.verbose.is_none());
        assert!(overrides.school_name.is_none());
        assert!(overrides.seed_sample_data.is_none());
        assert!(overrides.reports_dir.is_none());
    }

    #[test]
    fn test_to_config_overrides_with_values() {
        let cli = Cli {
            config_level: Some(LogLevelArg::Debug),
            config_log_file: Some(PathBuf::from("/tmp/test.log")),
            config_verbose: Some(true),
            school_name: Some("Riverside High".to_string()),
            no_seed: true,
            reports_dir: Some(PathBuf::from("/output")),
            ..bare()
        };

        let overrides = cli.to_config_overrides();
        assert_eq!(overrides.level, Some("debug".to_string()));
        assert_eq!(overrides.file, Some("/tmp/test.log".to_string()));
        assert_eq!(overrides.verbose, Some(true));
        assert_eq!(overrides.school_name, Some("Riverside High".to_string()));
        assert_eq!(overrides.seed_sample_data, Some(false));
        assert_eq!(overrides.reports_dir, Some("/output".to_string()));
    }

    #[test]
    fn test_short_form_precedence_over_long_form() {
        let cli = Cli {
            config_reports_dir: Some(PathBuf::from("/long/out")),
            reports_dir: Some(PathBuf::from("/short/out")),
            ..bare()
        };
        assert_eq!(
            cli.to_config_overrides().reports_dir,
            Some("/short/out".to_string())
        );

        let cli = Cli {
            config_reports_dir: Some(PathBuf::from("/long/out")),
            ..bare()
        };
        assert_eq!(
            cli.to_config_overrides().reports_dir,
            Some("/long/out".to_string())
        );
    }

    #[test]
    fn test_parse_defaults_to_shell() {
        let cli = Cli::try_parse_from(["gradebook"]).unwrap();
        assert!(cli.command.is_none());

        let cli = Cli::try_parse_from(["gradebook", "--no-seed", "shell"]).unwrap();
        assert!(cli.no_seed);
        assert!(matches!(cli.command, Some(Command::Shell)));
    }

    #[test]
    fn test_parse_report_command() {
        let cli =
            Cli::try_parse_from(["gradebook", "report", "course", "OOP101", "-f", "md"]).unwrap();
        match cli.command {
            Some(Command::Report {
                target,
                id,
                format,
                output,
                save,
            }) => {
                assert_eq!(target, ReportTarget::Course);
                assert_eq!(id.as_deref(), Some("OOP101"));
                assert_eq!(format, "md");
                assert!(output.is_none());
                assert!(!save);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
