//! Field format predicates
//!
//! Standalone format checks for email addresses, state contractor license
//! numbers, and federal EINs. The validators in `validators` delegate here;
//! each predicate is callable on its own for unit testing.

/// Syntactic email check: single `@`, non-empty local part, dotted domain.
/// Returns a user-facing message on failure.
pub fn validate_email_format(value: &str) -> Option<String> {
    let value = value.trim();
    if value.is_empty() {
        return Some("Email address is required".to_string());
    }

    let mut parts = value.splitn(2, '@');
    let local = parts.next().unwrap_or("");
    let domain = parts.next().unwrap_or("");

    let ok = !local.is_empty()
        && !domain.is_empty()
        && !value.contains(char::is_whitespace)
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.');

    if ok {
        None
    } else {
        Some("Enter a valid email address".to_string())
    }
}

/// Result of a per-state license format check.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LicenseCheck {
    pub valid: bool,
    pub error: Option<String>,
}

impl LicenseCheck {
    fn ok() -> Self {
        Self { valid: true, error: None }
    }

    fn fail(message: impl Into<String>) -> Self {
        Self { valid: false, error: Some(message.into()) }
    }
}

/// HVAC contractor license format, keyed by two-letter state code.
///
/// States without a dedicated rule fall back to a loose alphanumeric check
/// so an unlisted state never hard-blocks a signup.
pub fn validate_license_format(state: &str, value: &str) -> LicenseCheck {
    let value = value.trim().to_uppercase();
    if value.is_empty() {
        return LicenseCheck::fail("License number is required");
    }

    match state.trim().to_uppercase().as_str() {
        "FL" => {
            // CAC/CFC/CMC class prefix followed by 7 digits
            let valid = value.len() == 10
                && ["CAC", "CFC", "CMC"].iter().any(|p| value.starts_with(p))
                && value[3..].chars().all(|c| c.is_ascii_digit());
            if valid {
                LicenseCheck::ok()
            } else {
                LicenseCheck::fail("Enter a valid Florida license (e.g. CAC1234567)")
            }
        }
        "TX" => {
            let valid = (value.starts_with("TACLA") || value.starts_with("TACLB"))
                && value.len() > 5
                && value[5..].chars().all(|c| c.is_ascii_digit());
            if valid {
                LicenseCheck::ok()
            } else {
                LicenseCheck::fail("Enter a valid Texas license (e.g. TACLA12345)")
            }
        }
        "CA" => {
            let valid = (6..=8).contains(&value.len())
                && value.chars().all(|c| c.is_ascii_digit());
            if valid {
                LicenseCheck::ok()
            } else {
                LicenseCheck::fail("Enter a valid California license (6-8 digits)")
            }
        }
        "NC" | "GA" | "AZ" => {
            let valid = (4..=8).contains(&value.len())
                && value.chars().all(|c| c.is_ascii_digit());
            if valid {
                LicenseCheck::ok()
            } else {
                LicenseCheck::fail("Enter a valid license number for your state")
            }
        }
        _ => {
            let valid = value.len() >= 4 && value.chars().all(|c| c.is_ascii_alphanumeric());
            if valid {
                LicenseCheck::ok()
            } else {
                LicenseCheck::fail("Enter a valid license number for your state")
            }
        }
    }
}

/// Result of an EIN format check.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EinCheck {
    pub valid: bool,
    pub error: Option<String>,
}

/// Federal EIN in `NN-NNNNNNN` shape.
pub fn validate_ein(value: &str) -> EinCheck {
    let value = value.trim();
    if value.is_empty() {
        return EinCheck {
            valid: false,
            error: Some("Business Tax ID (EIN) is required".to_string()),
        };
    }

    let bytes = value.as_bytes();
    let valid = value.len() == 10
        && bytes[2] == b'-'
        && value[..2].chars().all(|c| c.is_ascii_digit())
        && value[3..].chars().all(|c| c.is_ascii_digit());

    if valid {
        EinCheck { valid: true, error: None }
    } else {
        EinCheck {
            valid: false,
            error: Some("Enter a valid EIN (format: 12-3456789)".to_string()),
        }
    }
}
