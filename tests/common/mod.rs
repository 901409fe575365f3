//! Shared integration test helpers for fontkeep.
//!
//! ```ignore
//! mod common;
//! use common::{settings_in_tmp_dir, StubEngine};
//! ```

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use fontkeep::config::ManagerSettings;
use fontkeep::fonts::{EngineError, FontEngine, FontFace, FontMetrics, FontStyle};
use tempfile::TempDir;

/// Creates a temporary font directory and a settings file pointing at it.
///
/// The layout created:
/// ```text
/// <tmp>/
///   config.yaml
///   resources.json   # family "Body" -> ["Extra"], emoji set "emoji_std"
///   fonts/
///     Body.ttf       # stub bytes
/// ```
///
/// Keep the `TempDir` alive until the test is done with the files.
pub fn settings_in_tmp_dir() -> (PathBuf, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let fonts_dir = temp_dir.path().join("fonts");
    fs::create_dir_all(&fonts_dir).expect("Failed to create fonts dir");
    fs::write(fonts_dir.join("Body.ttf"), b"stub").expect("Failed to write font stub");

    let resources = temp_dir.path().join("resources.json");
    fs::write(
        &resources,
        r#"{
  "font-family": [{ "font-name": "Body", "fallback": ["Extra", "emoji_std"] }],
  "emoji-list": [{
    "font-name": "emoji_std", "path": "/emoji/", "ext": "png",
    "match-size": { "min": 16, "max": 48 },
    "unicode-range": { "begin": 128512, "end": 128591 }
  }]
}"#,
    )
    .expect("Failed to write resources");

    let settings = ManagerSettings::new()
        .with_base_path(&fonts_dir)
        .with_resource_file(&resources);
    let config_path = temp_dir.path().join("config.yaml");
    settings.save(&config_path).expect("Failed to save settings");
    (config_path, temp_dir)
}

pub struct StubFace {
    pub size: u32,
}

impl FontFace for StubFace {
    fn metrics(&self) -> FontMetrics {
        FontMetrics {
            line_height: self.size as f32 * 1.5,
            base_line: self.size as f32 * 0.25,
            ascent: self.size as f32,
            descent: self.size as f32 * 0.25,
        }
    }

    fn has_glyph(&self, ch: char) -> bool {
        ch.is_ascii()
    }
}

/// Engine that "loads" any file that exists on disk.
#[derive(Default)]
pub struct StubEngine {
    pub loads: usize,
    pub destroys: usize,
}

impl FontEngine for StubEngine {
    type Face = StubFace;

    fn load(&mut self, path: &Path, size: u32, _style: FontStyle) -> Result<StubFace, EngineError> {
        if !path.exists() {
            return Err(EngineError::Io {
                path: path.to_path_buf(),
                source: std::io::Error::from(std::io::ErrorKind::NotFound),
            });
        }
        self.loads += 1;
        Ok(StubFace { size })
    }

    fn destroy(&mut self, _face: StubFace) {
        self.destroys += 1;
    }
}
