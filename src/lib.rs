//! Legend is the on-screen text and image layer of a bilingual (Latin + CJK) visual novel.
//!
//! Strings are drawn as a single line of script-homogeneous runs, each with the font bound to its
//! script:
//!
//! 1. **Decode**: bytes to code points, legacy UTF-8 up to six bytes ([`decode_next`])
//! 2. **Classify**: code point to [`ScriptClass`] via a fixed range table ([`classify`])
//! 3. **Segment**: bytes to ordered [`TextRun`]s covering the scanned prefix exactly ([`segment`])
//! 4. **Draw**: each run is measured or rasterized with its script's font and composited onto a
//!    [`Canvas`], the cursor advancing by the run's width ([`TextPainter`])
//!
//! Images are shown through [`Ui::show_image`], optionally with the fixed-step fade-in ramp
//! ([`FadeIn`], [`fade_in_image`]).
//!
//! Malformed input degrades instead of failing: decoding halts at the first bad sequence and
//! oversized runs are skipped. Missing fonts are fatal at [`Ui::init`]; missing images are
//! returned as [`LegendError::Image`].
#![forbid(unsafe_code)]

mod assets;
mod config;
mod effects;
mod foundation;
mod render;
mod script;
mod text;
mod ui;

pub use assets::decode::{PreparedImage, decode_image, load_image};
pub use assets::font::{FontFace, FontSet, LoadedFont};
pub use config::{FontEntry, UiConfig};
pub use effects::display::{ImageFlags, placement, show_image};
pub use effects::fade::{FadeConfig, FadeFrame, FadeIn, apply_fade_frame, fade_in_image};
pub use foundation::core::{CanvasSize, PixelRect, Rgb8, Rgba8Premul, parse_hex};
pub use foundation::error::{LegendError, LegendResult};
pub use render::canvas::{Canvas, CanvasStats, FrameRGBA, PixmapCanvas};
pub use render::composite::over;
pub use script::{Command, Script, ScriptReport, run_script};
pub use text::layout::{TextPainter, centered_origin};
pub use text::run::{RUN_BUFFER_CAPACITY, measure_run, render_run};
pub use text::script::{CJK_RANGES, ScriptClass, classify};
pub use text::segment::{Runs, TextRun, scanned_len, segment};
pub use text::utf8::{Decoded, decode_next};
pub use ui::Ui;
