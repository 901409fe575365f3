//! Shared integration test helpers for fontkeep-fonts.
//!
//! ```ignore
//! mod common;
//! use common::{CountingEngine, manager};
//! ```

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::rc::Rc;

use fontkeep_config::{
    CodepointRange, EmojiEntry, FontFamilyEntry, ManagerSettings, ResourceConfig, SizeRange,
};
use fontkeep_fonts::{EngineError, FontEngine, FontFace, FontManager, FontMetrics, FontStyle};

/// Base directory used by every test manager.
pub const BASE: &str = "/test-fonts";

/// Engine activity, shared with the test after the engine moves into a manager.
#[derive(Debug, Default)]
pub struct EngineLog {
    /// Load calls per resolved path
    pub loads: HashMap<PathBuf, usize>,
    /// Destroyed face serials, in order
    pub destroyed: Vec<u64>,
    /// Path of each face serial
    pub serials: HashMap<u64, PathBuf>,
}

impl EngineLog {
    pub fn total_loads(&self) -> usize {
        self.loads.values().sum()
    }

    pub fn loads_of(&self, name: &str) -> usize {
        self.loads.get(&font_path(name)).copied().unwrap_or(0)
    }

    /// How many faces loaded from `name` were destroyed.
    pub fn destroys_of(&self, name: &str) -> usize {
        let path = font_path(name);
        self.destroyed
            .iter()
            .filter(|serial| self.serials.get(serial) == Some(&path))
            .count()
    }

    /// Names of destroyed faces, in destruction order.
    pub fn destroyed_names(&self) -> Vec<String> {
        self.destroyed
            .iter()
            .filter_map(|serial| self.serials.get(serial))
            .filter_map(|path| path.file_stem())
            .map(|stem| stem.to_string_lossy().into_owned())
            .collect()
    }

    pub fn live_faces(&self) -> usize {
        self.serials.len() - self.destroyed.len()
    }
}

pub struct CountingFace {
    pub serial: u64,
    pub size: u32,
}

impl FontFace for CountingFace {
    fn metrics(&self) -> FontMetrics {
        // The serial doubles as face identity in caller views
        FontMetrics {
            line_height: self.size as f32,
            base_line: 0.0,
            ascent: self.serial as f32,
            descent: 0.0,
        }
    }

    fn has_glyph(&self, ch: char) -> bool {
        ch.is_ascii()
    }
}

/// Engine that records every load and destroy and fails on chosen names.
#[derive(Default)]
pub struct CountingEngine {
    log: Rc<RefCell<EngineLog>>,
    failing: HashSet<String>,
    next_serial: u64,
}

impl CountingEngine {
    pub fn new() -> (Self, Rc<RefCell<EngineLog>>) {
        let engine = Self::default();
        let log = Rc::clone(&engine.log);
        (engine, log)
    }

    /// Make loads of `name` fail.
    pub fn failing(mut self, name: &str) -> Self {
        self.failing.insert(name.to_string());
        self
    }
}

impl FontEngine for CountingEngine {
    type Face = CountingFace;

    fn load(&mut self, path: &Path, size: u32, _style: FontStyle) -> Result<CountingFace, EngineError> {
        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        if self.failing.contains(&stem) {
            return Err(EngineError::InvalidFont {
                path: path.to_path_buf(),
            });
        }

        self.next_serial += 1;
        let mut log = self.log.borrow_mut();
        *log.loads.entry(path.to_path_buf()).or_default() += 1;
        log.serials.insert(self.next_serial, path.to_path_buf());
        Ok(CountingFace {
            serial: self.next_serial,
            size,
        })
    }

    fn destroy(&mut self, face: CountingFace) {
        self.log.borrow_mut().destroyed.push(face.serial);
    }
}

/// Resolved path of `name` under the test base directory.
pub fn font_path(name: &str) -> PathBuf {
    Path::new(BASE).join(format!("{name}.ttf"))
}

pub fn settings(reuse_capacity: usize) -> ManagerSettings {
    ManagerSettings::new()
        .with_base_path(BASE)
        .with_reuse_capacity(reuse_capacity)
}

/// Resource table with one family and one emoji set:
/// - `Sans` falls back to `SansA` then `SansB`
/// - `emoji_std` covers 0x1F600..=0x1F64F from 16 to 48 px
pub fn resources() -> ResourceConfig {
    ResourceConfig {
        families: vec![FontFamilyEntry {
            font_name: "Sans".to_string(),
            fallback: vec!["SansA".to_string(), "SansB".to_string()],
        }],
        emoji: vec![EmojiEntry {
            font_name: "emoji_std".to_string(),
            path: "/emoji/".to_string(),
            ext: "png".to_string(),
            match_size: SizeRange { min: 16, max: 48 },
            unicode_range: CodepointRange {
                begin: 0x1F600,
                end: 0x1F64F,
            },
        }],
    }
}

/// Manager over `engine` with the standard test resources.
pub fn manager_with(engine: CountingEngine, reuse_capacity: usize) -> FontManager<CountingEngine> {
    FontManager::with_resources(engine, &settings(reuse_capacity), resources())
}

/// Fresh counting manager plus its engine log.
pub fn manager(reuse_capacity: usize) -> (FontManager<CountingEngine>, Rc<RefCell<EngineLog>>) {
    let (engine, log) = CountingEngine::new();
    (manager_with(engine, reuse_capacity), log)
}
