//! Startup configuration: window size, title, background and the per-script font registry.

use std::{
    collections::BTreeMap,
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::{
    assets::font::{FontSet, LoadedFont},
    effects::fade::FadeConfig,
    foundation::{
        core::{CanvasSize, Rgb8},
        error::{LegendError, LegendResult},
    },
    text::script::ScriptClass,
};

/// One font registry entry.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FontEntry {
    pub path: PathBuf,
    /// Nominal size; one point renders as one pixel.
    pub size: f32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UiConfig {
    pub width: u32,
    pub height: u32,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub background: Rgb8,
    /// Keyed by script name (`"latin"`, `"cjk"`).
    pub fonts: BTreeMap<String, FontEntry>,
    #[serde(default)]
    pub fade: FadeConfig,
}

impl UiConfig {
    pub fn from_json_str(s: &str) -> LegendResult<Self> {
        serde_json::from_str(s).map_err(|e| LegendError::config(format!("parse config: {e}")))
    }

    /// Read a JSON config. Relative font paths are resolved against the file's directory.
    pub fn from_path(path: &Path) -> LegendResult<Self> {
        let f = File::open(path).with_context(|| format!("open config '{}'", path.display()))?;
        let mut config: Self = serde_json::from_reader(BufReader::new(f))
            .map_err(|e| LegendError::config(format!("parse '{}': {e}", path.display())))?;
        let base = path.parent().unwrap_or_else(|| Path::new("."));
        config.resolve_relative_paths(base);
        Ok(config)
    }

    pub fn resolve_relative_paths(&mut self, base: &Path) {
        for entry in self.fonts.values_mut() {
            if entry.path.is_relative() {
                entry.path = base.join(&entry.path);
            }
        }
    }

    pub fn canvas_size(&self) -> LegendResult<CanvasSize> {
        CanvasSize::new(self.width, self.height)
            .map_err(|e| LegendError::config(format!("invalid window size: {e}")))
    }

    /// Registry lookup for `script`.
    pub fn font_entry(&self, script: ScriptClass) -> LegendResult<&FontEntry> {
        self.fonts.get(script.name()).ok_or_else(|| {
            LegendError::config(format!("no font configured for script '{script}'"))
        })
    }

    pub fn validate(&self) -> LegendResult<()> {
        self.canvas_size()?;
        for script in ScriptClass::ALL {
            let entry = self.font_entry(script)?;
            if !entry.size.is_finite() || entry.size <= 0.0 {
                return Err(LegendError::config(format!(
                    "font size for '{script}' must be finite and > 0"
                )));
            }
        }
        for name in self.fonts.keys() {
            if !ScriptClass::ALL.iter().any(|s| s.name() == name.as_str()) {
                return Err(LegendError::config(format!("unknown script '{name}' in fonts")));
            }
        }
        self.fade
            .validate()
            .map_err(|e| LegendError::config(format!("fade: {e}")))
    }

    /// Load one font per script class. Any failure is fatal for startup.
    #[tracing::instrument(skip(self))]
    pub fn load_fonts(&self) -> LegendResult<FontSet> {
        let mut fonts = FontSet::new();
        for script in ScriptClass::ALL {
            let entry = self.font_entry(script)?;
            let font = LoadedFont::load(&entry.path, entry.size).map_err(|e| {
                LegendError::font(format!("cannot load {script} font: {e}"))
            })?;
            tracing::info!(%script, family = font.family(), size = entry.size, "font ready");
            fonts.insert(script, font);
        }
        Ok(fonts)
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
