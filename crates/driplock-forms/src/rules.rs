//! Role rule table
//!
//! Declarative role → conditionally-required field mapping. Live validation
//! and the full submission-time pass both read this one table, so the two
//! paths cannot drift.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Customer segment selected during registration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Homeowner,
    HvacPro,
    PropertyManager,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Homeowner => "homeowner",
            Self::HvacPro => "hvac_pro",
            Self::PropertyManager => "property_manager",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "homeowner" => Some(Self::Homeowner),
            "hvac_pro" => Some(Self::HvacPro),
            "property_manager" => Some(Self::PropertyManager),
            _ => None,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Every field whose requiredness depends on the role. Fields outside this
/// set are unconditionally required or optional.
pub const CONDITIONAL_FIELDS: &[&str] = &["company", "state", "license_number", "business_tax_id"];

/// Fields required in addition to the base set for a given role.
pub fn required_for(role: Role) -> &'static [&'static str] {
    match role {
        Role::Homeowner => &[],
        Role::HvacPro => &["company", "state", "license_number"],
        Role::PropertyManager => &["company", "business_tax_id"],
    }
}

/// Whether `field` is required under `role`. Fields outside the conditional
/// set are not this table's concern and report `false`.
pub fn is_required(role: Role, field: &str) -> bool {
    required_for(role).contains(&field)
}
