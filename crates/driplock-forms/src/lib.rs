//! DripLock Form Validation Core
//!
//! Pure, synchronous validation layer shared by the two lead-capture forms:
//! the multi-role account registration and the Core-to-Mini upgrade claim.
//!
//! ## Layers
//!
//! - **Validators**: per-field predicates mapping a raw value (plus sibling
//!   values where cross-field rules apply) to an optional error message
//! - **Rule table**: declarative role → required-field mapping consumed by
//!   both live validation and the full submission-time pass
//! - **Form state**: values, error map, and touched flags with dependent
//!   re-validation on change
//!
//! Nothing in this crate performs I/O; the submission orchestration lives in
//! `driplock-pipeline`.

pub mod claim;
pub mod formats;
pub mod mask;
pub mod modal;
pub mod rules;
pub mod schema;
pub mod signup;
pub mod state;
pub mod strength;
pub mod upload;
pub mod validators;
pub mod values;

// Re-exports for convenience
pub use claim::ClaimSchema;
pub use modal::{ModalGuard, ModalLock};
pub use rules::Role;
pub use schema::{FormSchema, FormView};
pub use signup::SignupSchema;
pub use state::FormState;
pub use strength::{password_strength, PasswordStrength, StrengthLabel};
pub use upload::{check_photo, FileMeta, PhotoIssue, ALLOWED_PHOTO_TYPES, MAX_PHOTO_BYTES};
pub use values::{FieldErrors, FieldValue, FormValues};
