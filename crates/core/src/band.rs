//! Four-level severity bands and the reading classifier.

use serde::{Deserialize, Serialize};

use crate::hazard::HazardProfile;
use crate::types::Reading;

/// Severity band assigned to a single reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Band {
    /// Nothing detected (`W`).
    Clear,
    /// Below the concerning threshold (`G`).
    Acceptable,
    /// At or above the concerning threshold (`Y`).
    Concerning,
    /// At or above the dangerous threshold (`R`).
    Dangerous,
}

impl Band {
    /// All bands, least to most severe.
    pub const ALL: [Band; 4] = [
        Band::Clear,
        Band::Acceptable,
        Band::Concerning,
        Band::Dangerous,
    ];

    /// Single-letter form used in every export artifact.
    pub fn letter(&self) -> char {
        match self {
            Self::Clear => 'W',
            Self::Acceptable => 'G',
            Self::Concerning => 'Y',
            Self::Dangerous => 'R',
        }
    }

    /// Parse an artifact letter. Returns `None` for anything else.
    pub fn from_letter(letter: char) -> Option<Self> {
        match letter {
            'W' => Some(Self::Clear),
            'G' => Some(Self::Acceptable),
            'Y' => Some(Self::Concerning),
            'R' => Some(Self::Dangerous),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Clear => "Clear",
            Self::Acceptable => "Acceptable",
            Self::Concerning => "Concerning",
            Self::Dangerous => "Dangerous",
        }
    }
}

impl std::fmt::Display for Band {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// Classify a reading against a hazard profile.
///
/// Comparisons are strict-less-than against the yellow and red limits
/// only. `green_limit` is not a bound: any non-zero reading below the
/// yellow limit is `Acceptable`. Field-deployed report consumers depend
/// on these exact boundaries.
pub fn classify(reading: Reading, profile: &HazardProfile) -> Band {
    if reading == 0 {
        Band::Clear
    } else if reading < profile.yellow_limit {
        Band::Acceptable
    } else if reading < profile.red_limit {
        Band::Concerning
    } else {
        Band::Dangerous
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
