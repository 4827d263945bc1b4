//! JSON scene scripts: an ordered list of bridge calls replayed against a [`Ui`].

use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::{
    effects::display::ImageFlags,
    foundation::{
        core::Rgb8,
        error::{LegendError, LegendResult},
    },
    render::canvas::Canvas,
    ui::Ui,
};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case", deny_unknown_fields)]
pub enum Command {
    SetTitle {
        title: String,
    },
    DrawText {
        text: String,
        x: i32,
        y: i32,
        color: Rgb8,
    },
    DrawCenteredText {
        text: String,
        y: i32,
        color: Rgb8,
    },
    ShowImage {
        path: PathBuf,
        #[serde(default)]
        flags: ImageFlags,
    },
    Present,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Script {
    pub commands: Vec<Command>,
}

impl Script {
    pub fn from_json_str(s: &str) -> LegendResult<Self> {
        serde_json::from_str(s).map_err(|e| LegendError::validation(format!("parse script: {e}")))
    }

    pub fn from_path(path: &Path) -> LegendResult<Self> {
        let f = File::open(path).with_context(|| format!("open script '{}'", path.display()))?;
        serde_json::from_reader(BufReader::new(f))
            .map_err(|e| LegendError::validation(format!("parse '{}': {e}", path.display())))
    }
}

/// What a script run did.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ScriptReport {
    pub executed: usize,
    pub images_shown: usize,
    /// Images that failed to load or display; the script carried on without them.
    pub images_failed: Vec<PathBuf>,
}

/// Execute `script` in order. Relative image paths resolve against `assets_root`.
///
/// Image failures are logged and recorded in the report; text and canvas errors abort the run.
#[tracing::instrument(skip(ui, script), fields(commands = script.commands.len()))]
pub fn run_script<C: Canvas>(
    ui: &mut Ui<C>,
    script: &Script,
    assets_root: &Path,
) -> LegendResult<ScriptReport> {
    let mut report = ScriptReport::default();
    for command in &script.commands {
        match command {
            Command::SetTitle { title } => ui.set_title(title),
            Command::DrawText { text, x, y, color } => {
                ui.draw_text(text, *x, *y, color.to_packed())?;
            }
            Command::DrawCenteredText { text, y, color } => {
                ui.draw_centered_text(text, *y, color.to_packed())?;
            }
            Command::ShowImage { path, flags } => {
                let full = if path.is_relative() {
                    assets_root.join(path)
                } else {
                    path.clone()
                };
                match ui.show_image(&full, *flags) {
                    Ok(_) => report.images_shown += 1,
                    Err(e) => {
                        tracing::warn!(path = %full.display(), error = %e, "image not shown");
                        report.images_failed.push(full);
                    }
                }
            }
            Command::Present => ui.present()?,
        }
        report.executed += 1;
    }
    Ok(report)
}

#[cfg(test)]
#[path = "../tests/unit/script.rs"]
mod tests;
