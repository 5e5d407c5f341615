//! Command-line interface for commonkit.
//!
//! This module handles CLI argument parsing and the config subcommands.
//! `replay` is handed back to `main` so logging can be installed first.

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};

use commonkit_config::{Config, PlatformKind};

use crate::replay;

/// commonkit - input method arbitration toolkit
#[derive(Parser)]
#[command(name = "commonkit")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Log level argument for CLI
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum LogLevelArg {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevelArg {
    /// Convert to `log::LevelFilter`
    pub fn to_level_filter(self) -> log::LevelFilter {
        match self {
            LogLevelArg::Off => log::LevelFilter::Off,
            LogLevelArg::Error => log::LevelFilter::Error,
            LogLevelArg::Warn => log::LevelFilter::Warn,
            LogLevelArg::Info => log::LevelFilter::Info,
            LogLevelArg::Debug => log::LevelFilter::Debug,
            LogLevelArg::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Platform argument for CLI
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum PlatformArg {
    Desktop,
    Console,
    Mobile,
}

impl From<PlatformArg> for PlatformKind {
    fn from(arg: PlatformArg) -> Self {
        match arg {
            PlatformArg::Desktop => PlatformKind::Desktop,
            PlatformArg::Console => PlatformKind::Console,
            PlatformArg::Mobile => PlatformKind::Mobile,
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Replay a recorded input trace through the arbiter
    Replay {
        /// Trace file (YAML, or JSON with a .json extension)
        #[arg(value_name = "TRACE")]
        trace: PathBuf,

        /// Config file to use instead of the default location
        #[arg(long, value_name = "PATH")]
        config: Option<PathBuf>,

        /// Override the platform from the config
        #[arg(long, value_enum)]
        platform: Option<PlatformArg>,

        /// Set log level (overrides config and RUST_LOG)
        #[arg(long, value_enum, value_name = "LEVEL")]
        log_level: Option<LogLevelArg>,
    },

    /// Print the default configuration as YAML
    DefaultConfig,

    /// Load and validate a configuration file
    CheckConfig {
        #[arg(value_name = "PATH")]
        path: PathBuf,
    },
}

/// Options for a replay run, passed from CLI to `main`
#[derive(Clone, Debug)]
pub struct ReplayOptions {
    pub trace: PathBuf,
    /// Explicit config path; the default location is used when absent
    pub config_path: Option<PathBuf>,
    pub platform: Option<PlatformKind>,
    /// Log level override from CLI
    pub log_level: Option<log::LevelFilter>,
}

impl ReplayOptions {
    /// Load the config this run should use, with CLI overrides applied.
    pub fn load_config(&self) -> anyhow::Result<Config> {
        let mut config = match &self.config_path {
            Some(path) => Config::load_from(path)
                .with_context(|| format!("failed to load config {}", path.display()))?,
            None => Config::load().context("failed to load config")?,
        };
        if let Some(platform) = self.platform {
            config.platform.kind = platform;
        }
        Ok(config)
    }
}

/// Result of CLI processing
pub enum CliResult {
    /// Run a replay with these options
    Continue(ReplayOptions),
    /// Exit with the given code (subcommand completed)
    Exit(i32),
}

/// Process CLI arguments and handle subcommands
pub fn process_cli() -> CliResult {
    let cli = Cli::parse();

    match cli.command {
        Commands::Replay {
            trace,
            config,
            platform,
            log_level,
        } => CliResult::Continue(ReplayOptions {
            trace,
            config_path: config,
            platform: platform.map(Into::into),
            log_level: log_level.map(|l| l.to_level_filter()),
        }),
        Commands::DefaultConfig => {
            let result = print_default_config();
            CliResult::Exit(exit_code(result))
        }
        Commands::CheckConfig { path } => {
            let result = check_config(&path);
            CliResult::Exit(exit_code(result))
        }
    }
}

fn exit_code(result: anyhow::Result<()>) -> i32 {
    match result {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("commonkit: error: {e:#}");
            1
        }
    }
}

fn print_default_config() -> anyhow::Result<()> {
    let yaml = Config::default().to_yaml()?;
    print!("{}", yaml);
    Ok(())
}

fn check_config(path: &Path) -> anyhow::Result<()> {
    let config = Config::load_from(path)
        .with_context(|| format!("invalid config {}", path.display()))?;
    println!("{}: ok", path.display());
    println!(
        "  platform: {} (resolves to {})",
        config.platform.kind.display_name(),
        config.platform.kind.resolve().display_name()
    );
    println!(
        "  thrash:   {} (limit {}, window {:.2}s)",
        if config.thrash.enabled { "enabled" } else { "disabled" },
        config.thrash.limit,
        config.thrash.window_seconds
    );
    Ok(())
}

/// Replay the trace named in `options` and print the result to stdout.
pub fn run_replay(options: &ReplayOptions, config: &Config) -> anyhow::Result<()> {
    let entries = replay::load_trace(&options.trace)
        .with_context(|| format!("failed to load trace {}", options.trace.display()))?;
    let summary = replay::replay(&entries, config)?;

    for change in &summary.changes {
        println!("{}", change);
    }
    println!();
    println!("{}", summary);
    Ok(())
}
