use std::ops::Range;

use crate::text::{
    script::{ScriptClass, classify},
    utf8::{Decoded, decode_next},
};

/// Maximal contiguous span of one script class, in bytes of the source buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TextRun {
    pub script: ScriptClass,
    pub start: usize,
    pub len: usize,
}

impl TextRun {
    pub fn span(&self) -> Range<usize> {
        self.start..self.start + self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Borrow this run's bytes out of the buffer it was segmented from.
    ///
    /// Returns `None` if the span does not fit `text` (the run came from a different buffer).
    pub fn bytes<'a>(&self, text: &'a [u8]) -> Option<&'a [u8]> {
        text.get(self.span())
    }
}

/// Lazy left-to-right segmentation of a byte string into [`TextRun`]s.
///
/// Scanning stops for good at the first NUL byte, end of buffer, or malformed sequence; the run
/// in progress at that point is still yielded.
#[derive(Clone, Debug)]
pub struct Runs<'a> {
    text: &'a [u8],
    pos: usize,
    halted: bool,
}

impl<'a> Runs<'a> {
    pub fn new(text: &'a [u8]) -> Self {
        Self {
            text,
            pos: 0,
            halted: false,
        }
    }

    /// Byte offset scanning has reached so far.
    pub fn position(&self) -> usize {
        self.pos
    }
}

impl Iterator for Runs<'_> {
    type Item = TextRun;

    fn next(&mut self) -> Option<TextRun> {
        if self.halted {
            return None;
        }

        let start = self.pos;
        let mut active: Option<ScriptClass> = None;
        loop {
            match decode_next(self.text, self.pos) {
                Decoded::Scalar { value, len } => {
                    let class = classify(value);
                    match active {
                        None => active = Some(class),
                        Some(cur) if cur != class && self.pos > start => break,
                        Some(_) => {}
                    }
                    self.pos += len;
                }
                Decoded::Invalid => {
                    tracing::debug!(offset = self.pos, "malformed utf-8, segmentation halted");
                    self.halted = true;
                    break;
                }
                Decoded::Eof => {
                    self.halted = true;
                    break;
                }
            }
        }

        let script = active?;
        Some(TextRun {
            script,
            start,
            len: self.pos - start,
        })
    }
}

impl std::iter::FusedIterator for Runs<'_> {}

/// Split `text` into ordered script-homogeneous runs covering its scanned prefix exactly.
pub fn segment(text: &[u8]) -> Vec<TextRun> {
    Runs::new(text).collect()
}

/// Length of the prefix covered by `runs` (they are contiguous from byte 0).
pub fn scanned_len(runs: &[TextRun]) -> usize {
    runs.last().map(|r| r.start + r.len).unwrap_or(0)
}

#[cfg(test)]
#[path = "../../tests/unit/text/segment.rs"]
mod tests;
