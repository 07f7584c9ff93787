//! Upgrade claim form schema
//!
//! The "Core legacy unit to Mini" promotional claim: contact and install
//! address fields, a masked phone, a required consent box, and a required
//! photo of the installed Core unit.

use crate::schema::{FormSchema, FormView};
use crate::upload;
use crate::validators;

pub const FIELDS: &[&str] = &[
    "first_name",
    "last_name",
    "email",
    "phone",
    "street",
    "city",
    "state",
    "zip",
    "consent",
    "photo",
];

#[derive(Clone, Copy, Debug, Default)]
pub struct ClaimSchema;

impl FormSchema for ClaimSchema {
    fn fields(&self) -> &'static [&'static str] {
        FIELDS
    }

    fn validate_field(&self, name: &str, view: FormView<'_>) -> Option<String> {
        let values = view.values;
        match name {
            "first_name" => validators::validate_name(values.text("first_name"), "First name"),
            "last_name" => validators::validate_name(values.text("last_name"), "Last name"),
            "email" => validators::validate_email(values.text("email")),
            "phone" => validators::validate_phone(values.text("phone")),
            "street" => validators::validate_required(values.text("street"), "Street address"),
            "city" => validators::validate_required(values.text("city"), "City"),
            "state" => validators::validate_required(values.text("state"), "State"),
            "zip" => validators::validate_zip(values.text("zip")),
            "consent" => validators::validate_checked(
                values.flag("consent"),
                "Please confirm you agree to the upgrade program terms",
            ),
            "photo" => match view.attachment {
                None => Some("Please attach a photo of your installed Core unit".to_string()),
                Some(meta) => upload::check_photo(meta).err().map(|issue| issue.to_string()),
            },
            _ => None,
        }
    }
}
