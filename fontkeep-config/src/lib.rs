//! Configuration for the fontkeep font resource manager.
//!
//! This crate provides:
//!
//! - `ManagerSettings`: YAML settings (base path, default extension, reuse
//!   cache capacity, emoji prefix, path overrides)
//! - `ResourceConfig`: the JSON font family and emoji resource file, parsed
//!   per section so a bad section only disables its own feature
//! - Default values and typed errors

pub mod defaults;
pub mod error;
pub mod resources;
pub mod settings;
mod types;

// Re-export main types for convenience
pub use error::ConfigError;
pub use resources::{EMOJI_KEY, FAMILY_KEY, ResourceConfig};
pub use settings::ManagerSettings;
pub use types::{CodepointRange, EmojiEntry, FontFamilyEntry, PathOverrideEntry, SizeRange};
