//! Integration tests for the fontkeep command line.

mod common;

use clap::Parser;
use common::{StubEngine, settings_in_tmp_dir};
use fontkeep::cli::commands::{emoji_path, load_settings, probe, resolve};
use fontkeep::cli::{Cli, Commands, LogLevelArg, parse_codepoint};
use fontkeep::fonts::{FontKind, FontManager, FontStyle};

// ============================================================================
// Argument parsing
// ============================================================================

#[test]
fn test_emoji_command_parses_codepoint_forms() {
    for form in ["U+1F600", "0x1F600", "128512", "😀"] {
        let cli = Cli::try_parse_from(["fontkeep", "emoji", "emoji_std", "32", form]).unwrap();
        match cli.command {
            Commands::Emoji {
                font_name,
                height,
                codepoint,
            } => {
                assert_eq!(font_name, "emoji_std");
                assert_eq!(height, 32);
                assert_eq!(codepoint, 0x1F600, "form {form}");
            }
            other => panic!("unexpected command {other:?}"),
        }
    }
}

#[test]
fn test_global_options_after_subcommand() {
    let cli = Cli::try_parse_from([
        "fontkeep",
        "resolve",
        "Sans",
        "--config",
        "/tmp/fontkeep.yaml",
        "--log-level",
        "debug",
    ])
    .unwrap();
    assert_eq!(cli.config.as_deref(), Some(std::path::Path::new("/tmp/fontkeep.yaml")));
    assert_eq!(cli.log_level, Some(LogLevelArg::Debug));
    assert_eq!(
        cli.log_level.map(|l| l.to_level_filter()),
        Some(log::LevelFilter::Debug)
    );
}

#[test]
fn test_probe_defaults_and_style() {
    let cli = Cli::try_parse_from(["fontkeep", "probe", "Sans"]).unwrap();
    let Commands::Probe {
        size,
        style,
        family,
        ..
    } = cli.command
    else {
        panic!("expected probe");
    };
    assert_eq!(size, 16);
    assert_eq!(style, FontStyle::Normal);
    assert!(!family);

    let cli = Cli::try_parse_from([
        "fontkeep",
        "probe",
        "Sans",
        "--style",
        "bold-italic",
        "--size",
        "24",
        "--family",
    ])
    .unwrap();
    let Commands::Probe {
        size,
        style,
        family,
        ..
    } = cli.command
    else {
        panic!("expected probe");
    };
    assert_eq!(size, 24);
    assert_eq!(style, FontStyle::BoldItalic);
    assert!(family);
}

#[test]
fn test_bad_arguments_rejected() {
    assert!(Cli::try_parse_from(["fontkeep", "probe", "Sans", "--style", "wavy"]).is_err());
    assert!(Cli::try_parse_from(["fontkeep", "emoji", "emoji_std", "32", "U+ZZZ"]).is_err());
    assert!(Cli::try_parse_from(["fontkeep"]).is_err());
}

#[test]
fn test_parse_codepoint() {
    assert_eq!(parse_codepoint("65"), Ok(65));
    assert_eq!(parse_codepoint("0x41"), Ok(0x41));
    assert_eq!(parse_codepoint("u+41"), Ok(0x41));
    assert_eq!(parse_codepoint("A"), Ok(65));
    assert_eq!(parse_codepoint(" 7 "), Ok(7));
    assert!(parse_codepoint("").is_err());
    assert!(parse_codepoint("AB").is_err());
}

// ============================================================================
// Commands
// ============================================================================

#[test]
fn test_resolve_reports_existence() {
    let (config, temp_dir) = settings_in_tmp_dir();
    let settings = load_settings(Some(&config)).unwrap();
    let fonts = FontManager::new(StubEngine::default(), &settings);

    let found = resolve(&fonts, "Body");
    assert_eq!(found.path, temp_dir.path().join("fonts").join("Body.ttf"));
    assert!(found.exists);
    assert!(found.to_string().ends_with("(found)"));

    let missing = resolve(&fonts, "Other");
    assert!(!missing.exists);
    assert!(missing.to_string().ends_with("(missing)"));
}

#[test]
fn test_missing_settings_file_uses_defaults() {
    let temp_dir = tempfile::TempDir::new().unwrap();
    let settings = load_settings(Some(&temp_dir.path().join("absent.yaml"))).unwrap();
    assert_eq!(settings.reuse_capacity, 8);
}

#[test]
fn test_emoji_path_command() {
    let (config, _temp_dir) = settings_in_tmp_dir();
    let settings = load_settings(Some(&config)).unwrap();
    let mut fonts = FontManager::new(StubEngine::default(), &settings);

    assert_eq!(
        emoji_path(&mut fonts, "emoji_std", 32, 0x1F600).unwrap(),
        "/emoji/128512.png"
    );
    assert!(emoji_path(&mut fonts, "emoji_std", 32, 0x41).is_err());
    assert!(emoji_path(&mut fonts, "emoji_std", 100, 0x1F600).is_err());
    assert!(emoji_path(&mut fonts, "Body", 32, 0x1F600).is_err());

    // Nothing leaks from failed lookups
    fonts.shutdown().unwrap();
}

#[test]
fn test_probe_family_skips_missing_fallback() {
    let (config, _temp_dir) = settings_in_tmp_dir();
    let settings = load_settings(Some(&config)).unwrap();
    let mut fonts = FontManager::new(StubEngine::default(), &settings);

    let chain = probe(&mut fonts, "Body", 16, FontStyle::Normal, true).unwrap();
    assert_eq!(chain.len(), 2);
    assert_eq!(chain[0].key.name, "Body");
    assert_eq!(chain[0].kind, FontKind::Outline);
    assert_eq!(chain[0].metrics.line_height, 24.0);
    assert!(chain[0].source.is_some());
    assert_eq!(chain[1].key.name, "emoji_std");
    assert_eq!(chain[1].kind, FontKind::Emoji);
    assert!(chain[1].to_string().ends_with("[emoji]"));

    // Probe shuts the manager down, returning the parked face
    assert_eq!(fonts.engine().loads, 1);
    assert_eq!(fonts.engine().destroys, 1);
    assert_eq!(fonts.stats().records, 0);
}

#[test]
fn test_probe_single_font_failure() {
    let (config, _temp_dir) = settings_in_tmp_dir();
    let settings = load_settings(Some(&config)).unwrap();
    let mut fonts = FontManager::new(StubEngine::default(), &settings);

    assert!(probe(&mut fonts, "Extra", 16, FontStyle::Normal, false).is_err());
    assert!(probe(&mut fonts, "Extra", 16, FontStyle::Normal, true).is_err());
    let single = probe(&mut fonts, "Body", 12, FontStyle::Bold, false).unwrap();
    assert_eq!(single.len(), 1);
}
