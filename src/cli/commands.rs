//! Subcommand implementations.
//!
//! Each command computes a report first and prints it in `run`, so the
//! logic can be exercised without capturing stdout.

use std::fmt;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use fontkeep_config::ManagerSettings;
use fontkeep_fonts::{
    FontEngine, FontHandle, FontKey, FontKind, FontManager, FontMetrics, FontStyle, SwashEngine,
};

use super::{Cli, Commands};

/// Load settings from `--config` or the default location.
pub fn load_settings(config: Option<&PathBuf>) -> Result<ManagerSettings> {
    let path = config
        .cloned()
        .unwrap_or_else(ManagerSettings::config_path);
    ManagerSettings::load(&path)
        .with_context(|| format!("Failed to load settings from {}", path.display()))
}

/// Where a font name resolves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolveReport {
    pub path: PathBuf,
    pub exists: bool,
}

impl fmt::Display for ResolveReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let status = if self.exists { "found" } else { "missing" };
        write!(f, "{} ({})", self.path.display(), status)
    }
}

pub fn resolve<E: FontEngine>(fonts: &FontManager<E>, name: &str) -> ResolveReport {
    ResolveReport {
        path: fonts.resolve_path(name),
        exists: fonts.paths().exists(name),
    }
}

/// Image path an emoji font uses for `codepoint`.
pub fn emoji_path<E: FontEngine>(
    fonts: &mut FontManager<E>,
    font_name: &str,
    height: u32,
    codepoint: u32,
) -> Result<String> {
    let handle = fonts
        .create(font_name, height, FontStyle::Normal)
        .with_context(|| format!("Failed to create emoji font '{font_name}' at {height}px"))?;

    let path = match fonts.emoji_font(handle) {
        Some(font) => font.glyph_path(codepoint),
        None => {
            fonts.destroy(handle)?;
            bail!("'{font_name}' is not an emoji font name");
        }
    };
    fonts.destroy(handle)?;

    path.with_context(|| format!("U+{codepoint:04X} is outside the range of '{font_name}'"))
}

/// One link of a probed chain.
#[derive(Debug, Clone, PartialEq)]
pub struct ProbedFont {
    pub handle: FontHandle,
    pub key: FontKey,
    pub kind: FontKind,
    pub metrics: FontMetrics,
    /// File the face was loaded from; `None` for emoji fonts
    pub source: Option<PathBuf>,
}

impl fmt::Display for ProbedFont {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} line_height={:.2} base_line={:.2} ascent={:.2} descent={:.2}",
            self.handle,
            self.key,
            self.metrics.line_height,
            self.metrics.base_line,
            self.metrics.ascent,
            self.metrics.descent
        )?;
        match &self.source {
            Some(path) => write!(f, " [{}]", path.display()),
            None => write!(f, " [emoji]"),
        }
    }
}

/// Create `name` (with its fallbacks when `family`), describe the chain,
/// then release everything and shut the manager down.
pub fn probe<E: FontEngine>(
    fonts: &mut FontManager<E>,
    name: &str,
    size: u32,
    style: FontStyle,
    family: bool,
) -> Result<Vec<ProbedFont>> {
    let head = if family {
        match fonts.create_family(name, size, style) {
            Some(head) => head,
            None => bail!("No font of family '{name}' could be loaded"),
        }
    } else {
        fonts
            .create(name, size, style)
            .with_context(|| format!("Failed to load '{name}'"))?
    };

    let chain: Vec<ProbedFont> = fonts
        .chain(head)
        .into_iter()
        .filter_map(|handle| fonts.font(handle))
        .map(|view| ProbedFont {
            handle: view.handle,
            key: view.key.clone(),
            kind: view.kind,
            metrics: view.metrics,
            source: match view.kind {
                FontKind::Outline => Some(fonts.resolve_path(&view.key.name)),
                FontKind::Emoji => None,
            },
        })
        .collect();

    fonts.destroy_family(head);
    fonts.shutdown().context("Font manager did not shut down cleanly")?;
    Ok(chain)
}

/// Run the parsed command.
pub fn run(cli: &Cli) -> Result<()> {
    let settings = load_settings(cli.config.as_ref())?;
    let mut fonts = FontManager::new(SwashEngine::new(), &settings);
    crate::debug_log!("CLI", "Running {:?}", cli.command);

    match &cli.command {
        Commands::Resolve { name } => {
            println!("{}", resolve(&fonts, name));
        }
        Commands::Emoji {
            font_name,
            height,
            codepoint,
        } => {
            println!("{}", emoji_path(&mut fonts, font_name, *height, *codepoint)?);
        }
        Commands::Probe {
            name,
            size,
            style,
            family,
        } => {
            for font in probe(&mut fonts, name, *size, *style, *family)? {
                println!("{font}");
            }
        }
    }
    Ok(())
}
