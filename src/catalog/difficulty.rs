//! Chart difficulty codes.

use serde::{Deserialize, Serialize};

/// Label used for codes outside the known table.
pub const UNKNOWN_DIFFICULTY: &str = "Unknown";

/// Chart difficulty as reported in score lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Past,
    Present,
    Future,
    Beyond,
    Eternal,
}

impl Difficulty {
    /// Map a raw difficulty code. Only the exact strings `"0"` to `"4"` are known.
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "0" => Some(Self::Past),
            "1" => Some(Self::Present),
            "2" => Some(Self::Future),
            "3" => Some(Self::Beyond),
            "4" => Some(Self::Eternal),
            _ => None,
        }
    }

    /// Display label.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Past => "Past",
            Self::Present => "Present",
            Self::Future => "Future",
            Self::Beyond => "Beyond",
            Self::Eternal => "Eternal",
        }
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Label for a raw difficulty code, `"Unknown"` when the code is not in the table.
#[must_use]
pub fn difficulty_label(code: &str) -> &'static str {
    Difficulty::from_code(code).map_or(UNKNOWN_DIFFICULTY, Difficulty::label)
}
