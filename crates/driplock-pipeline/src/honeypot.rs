//! Honeypot screen
//!
//! Hidden inputs no human fills. Any non-empty value marks the submission as
//! automated; the caller surfaces only the generic rejection, never the
//! mechanism. Runs after client validation and before any network I/O.

use driplock_forms::FormValues;

/// Hidden field names on the upgrade claim form.
pub const CLAIM_HONEYPOTS: &[&str] = &["website", "fax_number"];

/// Hidden field name on the registration form.
pub const SIGNUP_HONEYPOTS: &[&str] = &["nickname"];

/// True when any honeypot field carries a value.
pub fn tripped(values: &FormValues, fields: &[&str]) -> bool {
    fields.iter().any(|f| !values.text(f).trim().is_empty())
}
