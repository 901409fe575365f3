//! Command-line interface for fontkeep.
//!
//! This module handles CLI argument parsing and dispatch. Subcommand
//! implementations live in the [`commands`] submodule.

pub mod commands;

use clap::{Parser, Subcommand};
use fontkeep_fonts::FontStyle;
use std::path::PathBuf;

/// fontkeep - Inspect fonts through the fontkeep resource manager
#[derive(Debug, Parser)]
#[command(name = "fontkeep")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Settings file (defaults to the per-user config location)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Set debug log level (overrides DEBUG_LEVEL and RUST_LOG)
    #[arg(long, global = true, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevelArg>,
}

/// Log level argument for CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
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

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show which file a font name resolves to
    Resolve {
        /// Logical font name
        name: String,
    },

    /// Show the image path an emoji font uses for a code point
    Emoji {
        /// Emoji font name (must carry the emoji prefix)
        font_name: String,

        /// Pixel height used to pick the emoji set
        height: u32,

        /// Code point: decimal, 0x1F600, U+1F600 or the character itself
        #[arg(value_parser = parse_codepoint)]
        codepoint: u32,
    },

    /// Load a font (or family) and print its metrics and fallback chain
    Probe {
        /// Logical font name
        name: String,

        /// Pixel size
        #[arg(long, default_value_t = 16)]
        size: u32,

        /// normal, italic, bold or bold-italic
        #[arg(long, default_value = "normal", value_parser = parse_style)]
        style: FontStyle,

        /// Attach the configured fallback chain
        #[arg(long)]
        family: bool,
    },
}

/// Parse a code point given as decimal, `0x` hex, `U+` hex or a single character.
pub fn parse_codepoint(value: &str) -> Result<u32, String> {
    let value = value.trim();
    let hex = value
        .strip_prefix("0x")
        .or_else(|| value.strip_prefix("0X"))
        .or_else(|| value.strip_prefix("U+"))
        .or_else(|| value.strip_prefix("u+"));

    let parsed = match hex {
        Some(digits) => u32::from_str_radix(digits, 16).map_err(|e| e.to_string()),
        None => match value.parse::<u32>() {
            Ok(n) => Ok(n),
            Err(e) => {
                let mut chars = value.chars();
                match (chars.next(), chars.next()) {
                    (Some(ch), None) => Ok(ch as u32),
                    _ => Err(e.to_string()),
                }
            }
        },
    };
    parsed.map_err(|e| format!("invalid code point '{value}': {e}"))
}

fn parse_style(value: &str) -> Result<FontStyle, String> {
    value.parse()
}

/// Parse arguments, install logging, run the subcommand and return the exit code.
pub fn process_cli() -> i32 {
    let cli = Cli::parse();
    crate::debug::init_log_bridge(cli.log_level.map(|l| l.to_level_filter()));
    crate::debug_info!("CLI", "fontkeep {} starting", crate::VERSION);

    match commands::run(&cli) {
        Ok(()) => 0,
        Err(e) => {
            crate::debug_error!("CLI", "{:#}", e);
            eprintln!("fontkeep: error: {e:#}");
            1
        }
    }
}
