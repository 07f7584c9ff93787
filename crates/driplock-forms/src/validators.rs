//! Field validators
//!
//! Pure functions from a raw input value (plus sibling values where
//! cross-field rules apply) to an optional user-facing error message.
//! `None` means valid. Empty or whitespace-only input always reads as
//! "not provided"; validators never panic.

use crate::formats;
use crate::rules::{self, Role};

/// Personal or contact name: at least two characters, letters/spaces/
/// hyphens/apostrophes only.
pub fn validate_name(value: &str, label: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.len() < 2 {
        return Some(format!("{label} must be at least 2 characters"));
    }
    let ok = trimmed
        .chars()
        .all(|c| c.is_alphabetic() || c == ' ' || c == '-' || c == '\'');
    if ok {
        None
    } else {
        Some(format!("{label} may only contain letters, spaces, hyphens, and apostrophes"))
    }
}

pub fn validate_email(value: &str) -> Option<String> {
    formats::validate_email_format(value)
}

pub fn validate_password(value: &str) -> Option<String> {
    if value.len() < 8 {
        Some("Password must be at least 8 characters".to_string())
    } else {
        None
    }
}

/// Literal equality with the password field; re-run whenever either changes.
pub fn validate_confirm_password(password: &str, confirm: &str) -> Option<String> {
    if confirm.is_empty() {
        Some("Please confirm your password".to_string())
    } else if confirm != password {
        Some("Passwords do not match".to_string())
    } else {
        None
    }
}

/// Generic required check for text inputs.
pub fn validate_required(value: &str, label: &str) -> Option<String> {
    if value.trim().is_empty() {
        Some(format!("{label} is required"))
    } else {
        None
    }
}

/// Consent / terms checkbox.
pub fn validate_checked(checked: bool, message: &str) -> Option<String> {
    if checked {
        None
    } else {
        Some(message.to_string())
    }
}

/// Company name, required only for roles the rule table says need one.
pub fn validate_company(role: Option<Role>, value: &str) -> Option<String> {
    match role {
        Some(role) if rules::is_required(role, "company") => {
            validate_required(value, "Company name")
        }
        _ => None,
    }
}

/// Licensing state, required only for HVAC professionals.
pub fn validate_state(role: Option<Role>, value: &str) -> Option<String> {
    match role {
        Some(role) if rules::is_required(role, "state") => validate_required(value, "State"),
        _ => None,
    }
}

/// Contractor license number. Required for HVAC professionals; once a state
/// is selected the per-state format check takes over.
pub fn validate_license(role: Option<Role>, state: &str, value: &str) -> Option<String> {
    match role {
        Some(role) if rules::is_required(role, "license_number") => {
            if value.trim().is_empty() {
                return Some("License number is required".to_string());
            }
            let state = state.trim();
            if state.is_empty() {
                // Format is state-specific; nothing more to check yet
                return None;
            }
            let check = formats::validate_license_format(state, value);
            if check.valid {
                None
            } else {
                Some(
                    check
                        .error
                        .unwrap_or_else(|| "Enter a valid license number".to_string()),
                )
            }
        }
        _ => None,
    }
}

/// Business Tax ID (EIN), required for property managers.
pub fn validate_business_tax_id(role: Option<Role>, value: &str) -> Option<String> {
    match role {
        Some(role) if rules::is_required(role, "business_tax_id") => {
            let check = formats::validate_ein(value);
            if check.valid {
                None
            } else {
                check.error.or_else(|| Some("Enter a valid EIN".to_string()))
            }
        }
        _ => None,
    }
}

/// Masked phone: optional, but partial input is invalid. Valid iff zero or
/// exactly ten digits.
pub fn validate_phone(value: &str) -> Option<String> {
    let digit_count = value.chars().filter(|c| c.is_ascii_digit()).count();
    if digit_count == 0 || digit_count == 10 {
        None
    } else {
        Some("Enter a complete 10-digit phone number".to_string())
    }
}

/// Exactly five ASCII digits.
pub fn validate_zip(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Some("ZIP code is required".to_string());
    }
    if trimmed.len() == 5 && trimmed.chars().all(|c| c.is_ascii_digit()) {
        None
    } else {
        Some("Enter a valid 5-digit ZIP code".to_string())
    }
}
