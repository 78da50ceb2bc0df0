// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Password strength scoring

use serde::{Deserialize, Serialize};

/// Qualitative strength levels, ordered by score
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum StrengthLevel {
    #[serde(rename = "Sangat Lemah")]
    VeryWeak,
    #[serde(rename = "Lemah")]
    Weak,
    #[serde(rename = "Cukup")]
    Fair,
    #[serde(rename = "Kuat")]
    Strong,
    #[serde(rename = "Sangat Kuat")]
    VeryStrong,
    #[serde(rename = "Ekstrim")]
    Extreme,
}

impl StrengthLevel {
    /// Level for a score; anything above 5 is `Extreme`
    pub fn from_score(score: u8) -> Self {
        match score {
            0 => StrengthLevel::VeryWeak,
            1 => StrengthLevel::Weak,
            2 => StrengthLevel::Fair,
            3 => StrengthLevel::Strong,
            4 => StrengthLevel::VeryStrong,
            _ => StrengthLevel::Extreme,
        }
    }

    /// Display label shown next to the meter
    pub fn label(&self) -> &'static str {
        match self {
            StrengthLevel::VeryWeak => "Sangat Lemah",
            StrengthLevel::Weak => "Lemah",
            StrengthLevel::Fair => "Cukup",
            StrengthLevel::Strong => "Kuat",
            StrengthLevel::VeryStrong => "Sangat Kuat",
            StrengthLevel::Extreme => "Ekstrim",
        }
    }

    /// Meter color
    pub fn color(&self) -> &'static str {
        match self {
            StrengthLevel::VeryWeak => "#ff6b6b",
            StrengthLevel::Weak => "#ff8c42",
            StrengthLevel::Fair => "#ffd93d",
            StrengthLevel::Strong => "#6bcf7f",
            StrengthLevel::VeryStrong => "#4ecdc4",
            StrengthLevel::Extreme => "#1d3557",
        }
    }
}

impl std::fmt::Display for StrengthLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Result of [`check_password_strength`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PasswordAssessment {
    /// Number of satisfied checks (0-6)
    pub score: u8,
    /// Qualitative level
    pub level: StrengthLevel,
    /// Meter color
    pub color: String,
    /// One suggestion per failed check, in check order
    pub feedback: Vec<String>,
}

impl PasswordAssessment {
    /// Every check passed
    pub fn is_max(&self) -> bool {
        self.feedback.is_empty()
    }
}

/// One scoring rule and the suggestion shown when it fails
struct Check {
    passes: fn(&str) -> bool,
    suggestion: &'static str,
}

const CHECKS: [Check; 6] = [
    Check {
        passes: has_min_length,
        suggestion: "Minimal 8 karakter",
    },
    Check {
        passes: has_recommended_length,
        suggestion: "Disarankan 12+ karakter",
    },
    Check {
        passes: has_lowercase,
        suggestion: "Tambahkan huruf kecil (a-z)",
    },
    Check {
        passes: has_uppercase,
        suggestion: "Tambahkan huruf besar (A-Z)",
    },
    Check {
        passes: has_digit,
        suggestion: "Tambahkan angka (0-9)",
    },
    Check {
        passes: has_symbol,
        suggestion: "Tambahkan simbol (!@#$%^&*)",
    },
];

fn has_min_length(p: &str) -> bool {
    utf16_len(p) >= 8
}

fn has_recommended_length(p: &str) -> bool {
    utf16_len(p) >= 12
}

fn has_lowercase(p: &str) -> bool {
    p.chars().any(|c| c.is_ascii_lowercase())
}

fn has_uppercase(p: &str) -> bool {
    p.chars().any(|c| c.is_ascii_uppercase())
}

fn has_digit(p: &str) -> bool {
    p.chars().any(|c| c.is_ascii_digit())
}

/// Anything outside `[a-zA-Z0-9]`, including non-ASCII letters
fn has_symbol(p: &str) -> bool {
    p.chars().any(|c| !c.is_ascii_alphanumeric())
}

/// Score a password against length and character-class checks
pub fn check_password_strength(password: &str) -> PasswordAssessment {
    let mut score = 0u8;
    let mut feedback = Vec::new();

    for check in &CHECKS {
        if (check.passes)(password) {
            score += 1;
        } else {
            feedback.push(check.suggestion.to_string());
        }
    }

    let level = StrengthLevel::from_score(score);
    PasswordAssessment {
        score,
        level,
        color: level.color().to_string(),
        feedback,
    }
}

/// Length as the browser counts it
fn utf16_len(s: &str) -> usize {
    s.encode_utf16().count()
}
