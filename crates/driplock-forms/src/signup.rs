//! Registration form schema
//!
//! Multi-role sign-up: base fields for everyone, plus the role-conditional
//! set from the rule table (company, licensing state, license number,
//! business tax ID).

use crate::rules::Role;
use crate::schema::{FormSchema, FormView};
use crate::validators;

pub const FIELDS: &[&str] = &[
    "name",
    "email",
    "password",
    "confirm_password",
    "role",
    "company",
    "state",
    "license_number",
    "business_tax_id",
    "accept_terms",
];

#[derive(Clone, Copy, Debug, Default)]
pub struct SignupSchema;

impl SignupSchema {
    fn role(view: FormView<'_>) -> Option<Role> {
        Role::parse(view.values.text("role"))
    }
}

impl FormSchema for SignupSchema {
    fn fields(&self) -> &'static [&'static str] {
        FIELDS
    }

    fn validate_field(&self, name: &str, view: FormView<'_>) -> Option<String> {
        let values = view.values;
        match name {
            "name" => validators::validate_name(values.text("name"), "Name"),
            "email" => validators::validate_email(values.text("email")),
            "password" => validators::validate_password(values.text("password")),
            "confirm_password" => validators::validate_confirm_password(
                values.text("password"),
                values.text("confirm_password"),
            ),
            "role" => match Self::role(view) {
                Some(_) => None,
                None => Some("Please select your role".to_string()),
            },
            "company" => validators::validate_company(Self::role(view), values.text("company")),
            "state" => validators::validate_state(Self::role(view), values.text("state")),
            "license_number" => validators::validate_license(
                Self::role(view),
                values.text("state"),
                values.text("license_number"),
            ),
            "business_tax_id" => validators::validate_business_tax_id(
                Self::role(view),
                values.text("business_tax_id"),
            ),
            "accept_terms" => validators::validate_checked(
                values.flag("accept_terms"),
                "You must accept the terms to create an account",
            ),
            _ => None,
        }
    }

    fn dependents(&self, name: &str) -> &'static [&'static str] {
        match name {
            "password" => &["confirm_password"],
            // Role changes re-scope every conditional field
            "role" => &["company", "state", "license_number", "business_tax_id"],
            // License format is state-specific
            "state" => &["license_number"],
            _ => &[],
        }
    }
}
