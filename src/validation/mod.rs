//! Validation gate run before any contact mutation.
//!
//! Every rule is evaluated, so a rejected submission reports all of its problems at
//! once. A rejection carries the submitted form back for re-display.

pub mod rules;

use crate::core::{Contact, ContactForm, Result, UpdateContactForm};
use crate::storage::ContactStore;
use serde::Serialize;
use std::fmt;

pub use rules::{is_email, is_indonesian_mobile};

/// Message reported when the name field is blank.
pub const NAME_REQUIRED_MESSAGE: &str = "Contact name is required.";
/// Message reported when another contact already uses the name.
pub const NAME_TAKEN_MESSAGE: &str = "Contact name is already taken.";
/// Message reported for a malformed email address.
pub const EMAIL_INVALID_MESSAGE: &str = "Email is not valid.";
/// Message reported for a number that is not an Indonesian mobile number.
pub const MOBILE_INVALID_MESSAGE: &str = "Mobile number is not valid.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Name,
    Email,
    Mobile,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Field::Name => "name",
            Field::Email => "email",
            Field::Mobile => "mobile",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    pub field: Field,
    pub message: &'static str,
}

impl Violation {
    const fn new(field: Field, message: &'static str) -> Self {
        Self { field, message }
    }
}

/// A submission that failed at least one rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejection<F> {
    pub violations: Vec<Violation>,
    pub submitted: F,
}

impl<F> Rejection<F> {
    pub fn has(&self, field: Field) -> bool {
        self.violations.iter().any(|violation| violation.field == field)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict<T, F> {
    Accepted(T),
    Rejected(Rejection<F>),
}

/// An update that passed the gate: the record named `prior_name` becomes `contact`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcceptedUpdate {
    pub prior_name: String,
    pub contact: Contact,
}

/// Gate for the add flow.
pub async fn check_new(
    store: &dyn ContactStore,
    form: ContactForm,
) -> Result<Verdict<Contact, ContactForm>> {
    let mut violations = Vec::new();
    let name = form.name.trim();

    if name.is_empty() {
        violations.push(Violation::new(Field::Name, NAME_REQUIRED_MESSAGE));
    } else if store.exists_by_name(name).await? {
        violations.push(Violation::new(Field::Name, NAME_TAKEN_MESSAGE));
    }
    violations.extend(format_violations(&form));

    if violations.is_empty() {
        Ok(Verdict::Accepted(form.into_contact()))
    } else {
        Ok(Verdict::Rejected(Rejection {
            violations,
            submitted: form,
        }))
    }
}

/// Gate for the edit flow. Keeping the prior name (in any letter case) is not a
/// collision with the record being edited.
pub async fn check_update(
    store: &dyn ContactStore,
    form: UpdateContactForm,
) -> Result<Verdict<AcceptedUpdate, UpdateContactForm>> {
    let mut violations = Vec::new();
    let name = form.name.trim();

    if name.is_empty() {
        violations.push(Violation::new(Field::Name, NAME_REQUIRED_MESSAGE));
    } else if form.renames() && store.exists_by_name(name).await? {
        violations.push(Violation::new(Field::Name, NAME_TAKEN_MESSAGE));
    }
    let fields = form.fields();
    violations.extend(format_violations(&fields));

    if violations.is_empty() {
        Ok(Verdict::Accepted(AcceptedUpdate {
            prior_name: form.prior_name,
            contact: fields.into_contact(),
        }))
    } else {
        Ok(Verdict::Rejected(Rejection {
            violations,
            submitted: form,
        }))
    }
}

fn format_violations(form: &ContactForm) -> Vec<Violation> {
    let mut violations = Vec::new();
    if !is_email(form.email.trim()) {
        violations.push(Violation::new(Field::Email, EMAIL_INVALID_MESSAGE));
    }
    if !is_indonesian_mobile(form.mobile.trim()) {
        violations.push(Violation::new(Field::Mobile, MOBILE_INVALID_MESSAGE));
    }
    violations
}
