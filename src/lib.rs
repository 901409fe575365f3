// Library exports for the fontkeep CLI and for embedding.
//
// The font manager itself lives in `fontkeep-fonts` and its settings in
// `fontkeep-config`; this crate adds the logging backend and the CLI.

/// Application version (root crate version, for use by sub-crates).
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[macro_use]
pub mod debug;

pub mod cli;
pub mod config {
    //! Settings and resource file re-exports from fontkeep-config crate.
    pub use fontkeep_config::{
        CodepointRange, ConfigError, EmojiEntry, FontFamilyEntry, ManagerSettings,
        PathOverrideEntry, ResourceConfig, SizeRange,
    };
}
pub mod fonts {
    //! Font manager re-exports from fontkeep-fonts crate.
    pub use fontkeep_fonts::{
        EmojiFont, EngineError, FontEngine, FontError, FontFace, FontHandle, FontKey, FontKind,
        FontManager, FontMetrics, FontStyle, FontView, GlyphSource, LeakReport, OverrideId,
        SwashEngine,
    };
}
