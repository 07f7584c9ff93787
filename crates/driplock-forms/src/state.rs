//! Live form state
//!
//! Values, error map, and touched flags for one form instance. Changing a
//! field re-validates it once the user has interacted with it, and
//! re-validates its dependents so cross-field rules (confirm-password, the
//! role rule table, per-state license formats) never leave stale errors.

use crate::schema::{FormSchema, FormView};
use crate::upload::FileMeta;
use crate::values::{FieldErrors, FieldValue, FormValues};
use std::collections::HashSet;

#[derive(Clone, Debug)]
pub struct FormState<S: FormSchema> {
    schema: S,
    values: FormValues,
    attachment: Option<FileMeta>,
    errors: FieldErrors,
    touched: HashSet<String>,
}

impl<S: FormSchema> FormState<S> {
    pub fn new(schema: S) -> Self {
        Self {
            schema,
            values: FormValues::new(),
            attachment: None,
            errors: FieldErrors::new(),
            touched: HashSet::new(),
        }
    }

    pub fn values(&self) -> &FormValues {
        &self.values
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn error(&self, name: &str) -> Option<&str> {
        self.errors.get(name)
    }

    pub fn attachment(&self) -> Option<&FileMeta> {
        self.attachment.as_ref()
    }

    pub fn is_touched(&self, name: &str) -> bool {
        self.touched.contains(name)
    }

    /// Set a field value and run the live-validation reaction.
    pub fn set(&mut self, name: &str, value: impl Into<FieldValue>) {
        self.values.set(name, value);
        self.react(name);
    }

    /// Attach or clear the file selection, then react as a change to the
    /// `photo` field.
    pub fn set_attachment(&mut self, meta: Option<FileMeta>) {
        self.attachment = meta;
        self.react("photo");
    }

    /// Mark a field touched (blur) and validate it immediately.
    pub fn touch(&mut self, name: &str) {
        self.touched.insert(name.to_string());
        let outcome = self.schema.validate_field(name, self.view());
        self.errors.record(name, outcome);
    }

    /// Record a failure from outside the schema (e.g. the verification-code
    /// step) against a field.
    pub fn set_error(&mut self, name: &str, message: impl Into<String>) {
        self.touched.insert(name.to_string());
        self.errors.set(name, message);
    }

    pub fn clear_error(&mut self, name: &str) {
        self.errors.clear_field(name);
    }

    /// Full-form validation pass, run once at submission time regardless of
    /// touched state. Marks everything touched and rebuilds the error map
    /// from scratch, so afterwards it exactly reflects the current values.
    pub fn validate_all(&mut self) -> bool {
        let mut errors = FieldErrors::new();
        for field in self.schema.fields() {
            self.touched.insert(field.to_string());
            errors.record(field, self.schema.validate_field(field, self.view()));
        }
        self.errors = errors;
        self.errors.is_empty()
    }

    /// Clear all transient state back to a fresh form.
    pub fn reset(&mut self) {
        self.values.clear();
        self.attachment = None;
        self.errors.clear();
        self.touched.clear();
    }

    fn view(&self) -> FormView<'_> {
        FormView {
            values: &self.values,
            attachment: self.attachment.as_ref(),
        }
    }

    /// Live reaction to a change of `name`: re-validate the field itself if
    /// the user has seen feedback for it, then every dependent that is
    /// either touched or currently carries an error (dropping errors that
    /// the change made irrelevant, e.g. on role switch).
    fn react(&mut self, name: &str) {
        if self.touched.contains(name) || self.errors.contains(name) {
            let outcome = self.schema.validate_field(name, self.view());
            self.errors.record(name, outcome);
        }
        for dep in self.schema.dependents(name) {
            if self.touched.contains(*dep) || self.errors.contains(dep) {
                let outcome = self.schema.validate_field(dep, self.view());
                self.errors.record(dep, outcome);
            }
        }
    }
}
