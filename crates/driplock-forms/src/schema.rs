//! Form schemas
//!
//! A schema names a form's fields, validates one field against the current
//! values, and declares which fields depend on which. `FormState` drives
//! live and full-form validation through this one interface, so both paths
//! run identical rules.

use crate::upload::FileMeta;
use crate::values::FormValues;

/// Read-only snapshot a validator sees: the current values plus, for forms
/// with an upload control, the attached file's metadata.
#[derive(Clone, Copy)]
pub struct FormView<'a> {
    pub values: &'a FormValues,
    pub attachment: Option<&'a FileMeta>,
}

pub trait FormSchema {
    /// Every field this form validates, in display order.
    fn fields(&self) -> &'static [&'static str];

    /// Validate one field against the current view. `None` means valid.
    /// Unknown field names validate clean.
    fn validate_field(&self, name: &str, view: FormView<'_>) -> Option<String>;

    /// Fields whose validity may change when `name` changes.
    fn dependents(&self, name: &str) -> &'static [&'static str] {
        let _ = name;
        &[]
    }
}
