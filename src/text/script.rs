use serde::{Deserialize, Serialize};

/// Script class used to pick the rendering font.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum ScriptClass {
    Latin,
    Cjk,
}

impl ScriptClass {
    pub const ALL: [ScriptClass; 2] = [ScriptClass::Latin, ScriptClass::Cjk];

    /// Key used by the font registry.
    pub fn name(self) -> &'static str {
        match self {
            ScriptClass::Latin => "latin",
            ScriptClass::Cjk => "cjk",
        }
    }
}

impl std::fmt::Display for ScriptClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Inclusive code point ranges rendered with the CJK font.
///
/// The last entry is kept as written even though its lower bound lies above its upper bound, so
/// it matches nothing; the CJK Compatibility Ideographs Supplement (0x2F800..=0x2FA1D) therefore
/// classifies as Latin.
pub const CJK_RANGES: [(u32, u32); 6] = [
    (0x2E80, 0x33FF),
    (0xFF00, 0xFFEF),
    (0x4E00, 0x9FBB),
    (0xF900, 0xFAD9),
    (0x2_0000, 0x2_A6D6),
    (0x2F_8000, 0x2F_A1D),
];

pub fn classify(cp: u32) -> ScriptClass {
    if CJK_RANGES
        .iter()
        .any(|&(lo, hi)| (lo..=hi).contains(&cp))
    {
        ScriptClass::Cjk
    } else {
        ScriptClass::Latin
    }
}

#[cfg(test)]
#[path = "../../tests/unit/text/script.rs"]
mod tests;
