//! Password strength meter
//!
//! Advisory only; never an input to validity. One point each for length ≥ 8,
//! mixed case, a digit, and a symbol.

use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum StrengthLabel {
    Weak,
    Fair,
    Good,
    Strong,
    VeryStrong,
}

impl StrengthLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Weak => "Weak",
            Self::Fair => "Fair",
            Self::Good => "Good",
            Self::Strong => "Strong",
            Self::VeryStrong => "Very Strong",
        }
    }

    /// Display color for the strength bar.
    pub fn color(&self) -> &'static str {
        match self {
            Self::Weak => "#ef4444",
            Self::Fair => "#f97316",
            Self::Good => "#eab308",
            Self::Strong => "#22c55e",
            Self::VeryStrong => "#16a34a",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct PasswordStrength {
    /// 0-4; a score of 0 produces no label.
    pub score: u8,
    pub label: Option<StrengthLabel>,
}

/// Score a password. Empty input scores 0 with no label.
pub fn password_strength(password: &str) -> PasswordStrength {
    let mut score = 0u8;

    if password.len() >= 8 {
        score += 1;
    }
    if password.chars().any(|c| c.is_ascii_lowercase())
        && password.chars().any(|c| c.is_ascii_uppercase())
    {
        score += 1;
    }
    if password.chars().any(|c| c.is_ascii_digit()) {
        score += 1;
    }
    if password.chars().any(|c| !c.is_alphanumeric()) {
        score += 1;
    }

    let label = match score {
        0 => None,
        1 => Some(StrengthLabel::Weak),
        2 => Some(StrengthLabel::Fair),
        3 => Some(StrengthLabel::Good),
        // All four points plus extra length reads as Very Strong
        _ if password.len() >= 12 => Some(StrengthLabel::VeryStrong),
        _ => Some(StrengthLabel::Strong),
    };

    PasswordStrength { score, label }
}
