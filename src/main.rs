// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]
// Add other lints specific to this module that you want to allow but not auto-fix

use anyhow::{Result, anyhow, Context};
use log::{warn, info, LevelFilter, Log, Metadata, Record, Level, SetLoggerError};
use std::path::{Path, PathBuf};
use std::io::Write;
use std::fs::File;
use std::io::BufReader;
use clap::{Parser, ValueEnum, CommandFactory, Subcommand};
use clap_complete::{generate, Shell};

use crate::app_config::Config;
use crate::correction::{Confirmer, SkipAll, TerminalConfirmer};
use app_controller::{Controller, FileOutcome, RunMode};

mod app_config;
mod correction;
mod subtitle_processor;
mod file_utils;
mod app_controller;
mod language_utils;
mod spellcheck;
mod word_lists;
mod errors;

/// CLI Wrapper for RunMode to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliRunMode {
    Correct,
    Spellcheck,
}

impl From<CliRunMode> for RunMode {
    fn from(cli_mode: CliRunMode) -> Self {
        match cli_mode {
            CliRunMode::Correct => RunMode::Correct,
            CliRunMode::Spellcheck => RunMode::Spellcheck,
        }
    }
}

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate shell completions for stac
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// STAC - Sub-Titles Auto Correct
///
/// Fixes the usual OCR and typing mistakes of SubRip subtitle files in place.
#[derive(Parser, Debug)]
#[command(name = "stac")]
#[command(version)]
#[command(about = "Rule-based subtitle corrector")]
#[command(long_about = "STAC corrects SubRip (.srt) subtitles: punctuation spacing, italic tags, dialog hyphens,
numbers, OCR letter confusions, known misspellings and hearing-impaired annotations.

EXAMPLES:
    stac movie.fr.srt                          # Correct one file (a backup is kept)
    stac --depth 2 /series/                    # Correct every subtitle two folder levels deep
    stac --interactive movie.eng.srt           # Ask about ambiguous corrections
    stac --dry-run --log-level debug /movies/  # Report what would change, write nothing
    stac --mode spellcheck movie.fr.srt        # Open the file in the word processor spellcheck
    stac completions bash > stac.bash          # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config-path. If the config file doesn't exist, a default one
    will be created automatically.

LANGUAGE:
    The language comes from the tag before the extension: movie.fr.srt, movie_eng.srt,
    movie [french].srt. Files without a known tag only get the language-neutral rules.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Subtitle file or directory to process
    #[arg(value_name = "INPUT_PATH")]
    input_path: Option<PathBuf>,

    /// What to do with each file
    #[arg(short, long, value_enum, default_value = "correct")]
    mode: CliRunMode,

    /// Folder levels searched below INPUT_PATH
    #[arg(short, long)]
    depth: Option<usize>,

    /// Ask about ambiguous corrections on the terminal
    #[arg(short, long)]
    interactive: bool,

    /// Do not keep a copy of the original file
    #[arg(long)]
    no_backup: bool,

    /// Correct without writing anything
    #[arg(long)]
    dry_run: bool,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: Emoji for log level
    fn get_emoji_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "❌ ",
            Level::Warn => "🚧 ",
            Level::Info => " ",
            Level::Debug => "🔍 ",
            Level::Trace => "📋 ",
        }
    }

    // @returns: ANSI colour code for log level
    fn get_color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "31",
            Level::Warn => "33",
            Level::Info => "32",
            Level::Debug => "36",
            Level::Trace => "35",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let emoji = Self::get_emoji_for_level(record.level());
            let color = Self::get_color_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "\x1B[1;{}m{} {} {}\x1B[0m",
                color, now, emoji, record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

fn main() -> Result<()> {
    // The logger accepts everything, the max level filters
    CustomLogger::init(LevelFilter::Trace)?;
    log::set_max_level(LevelFilter::Info);

    // Parse command line arguments using clap
    let cli = CommandLineOptions::parse();

    // Handle subcommands
    if let Some(Commands::Completions { shell }) = cli.command {
        let mut cmd = CommandLineOptions::command();
        generate(shell, &mut cmd, "stac", &mut std::io::stdout());
        return Ok(());
    }

    let input_path = cli.input_path.clone().ok_or_else(|| {
        anyhow!("INPUT_PATH is required when no subcommand is specified")
    })?;

    run_correct(&cli, &input_path)
}

// @returns: Configuration from file or a freshly written default
fn load_config(config_path: &str) -> Result<Config> {
    if Path::new(config_path).exists() {
        let file = File::open(config_path)
            .context(format!("Failed to open config file: {}", config_path))?;

        let reader = BufReader::new(file);
        let config: Config = serde_json::from_reader(reader)
            .context(format!("Failed to parse config file: {}", config_path))?;
        Ok(config)
    } else {
        warn!("Config file not found at '{}', creating default config.", config_path);

        let config = Config::default();
        let config_json = serde_json::to_string_pretty(&config)
            .context("Failed to serialize default config to JSON")?;

        std::fs::write(config_path, config_json)
            .context(format!("Failed to write default config to file: {}", config_path))?;

        Ok(config)
    }
}

fn run_correct(options: &CommandLineOptions, input_path: &Path) -> Result<()> {
    // If log level is set via command line, apply it immediately
    if let Some(cmd_log_level) = &options.log_level {
        let config_log_level: app_config::LogLevel = cmd_log_level.clone().into();
        log::set_max_level(config_log_level.to_level_filter());
    }

    let mut config = load_config(&options.config_path)?;

    // Override config with CLI options if provided
    if let Some(depth) = options.depth {
        config.files.depth = depth;
    }
    if options.interactive {
        config.correction.interactive = true;
    }
    if options.no_backup {
        config.files.backup = false;
    }
    if let Some(log_level) = &options.log_level {
        config.log_level = log_level.clone().into();
    }

    // Validate the configuration after loading and overriding
    config.validate()
        .context("Configuration validation failed")?;

    if options.log_level.is_none() {
        log::set_max_level(config.log_level.to_level_filter());
    }

    let mut confirmer: Box<dyn Confirmer> = if config.correction.interactive {
        Box::new(TerminalConfirmer::stdio())
    } else {
        Box::new(SkipAll)
    };

    let controller = Controller::with_config(config)?.with_dry_run(options.dry_run);
    let mode = RunMode::from(options.mode.clone());

    if input_path.is_file() {
        let report = controller.run(input_path, mode, confirmer.as_mut())?;
        match report.outcome {
            FileOutcome::Unchanged => info!("Nothing to correct in {:?}", report.path),
            FileOutcome::Skipped(reason) => warn!("Skipped {:?}: {}", report.path, reason),
            _ => info!("Success: {:?}", report.path),
        }
    } else if input_path.is_dir() {
        controller.run_folder(input_path, mode, confirmer.as_mut())?;
    } else {
        return Err(anyhow!("Input path does not exist: {:?}", input_path));
    }

    Ok(())
}
