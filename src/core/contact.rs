use serde::{Deserialize, Serialize};

/// A single entry of the contact directory.
///
/// `name` identifies the contact. Uniqueness is case-insensitive and is enforced by the
/// validation gate before a write, never by the persisted document itself.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    #[serde(alias = "nama")]
    pub name: String,
    pub email: String,
    #[serde(alias = "noHP")]
    pub mobile: String,
}

impl Contact {
    pub fn new(name: impl Into<String>, email: impl Into<String>, mobile: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            mobile: mobile.into(),
        }
    }

    /// Whether this contact answers to `name` under the directory's matching rule.
    pub fn is_named(&self, name: &str) -> bool {
        names_match(&self.name, name)
    }

    /// Percent-encoded name, safe to splice into a URL path segment.
    pub fn path_segment(&self) -> String {
        urlencoding::encode(&self.name).into_owned()
    }
}

/// Name comparison used everywhere a contact is looked up, checked for duplicates,
/// deleted or replaced.
pub fn names_match(left: &str, right: &str) -> bool {
    left == right || left.to_lowercase() == right.to_lowercase()
}

/// Submitted fields of the "add contact" form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub mobile: String,
}

impl ContactForm {
    pub fn into_contact(self) -> Contact {
        Contact {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            mobile: self.mobile.trim().to_string(),
        }
    }
}

/// Submitted fields of the "edit contact" form.
///
/// `prior_name` is the name the record had when the form was opened; it keys the
/// replacement and is never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateContactForm {
    #[serde(default, rename = "priorName")]
    pub prior_name: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub mobile: String,
}

impl UpdateContactForm {
    /// Pre-fills the edit form from a stored record.
    pub fn from_contact(contact: &Contact) -> Self {
        Self {
            prior_name: contact.name.clone(),
            name: contact.name.clone(),
            email: contact.email.clone(),
            mobile: contact.mobile.clone(),
        }
    }

    pub fn fields(&self) -> ContactForm {
        ContactForm {
            name: self.name.clone(),
            email: self.email.clone(),
            mobile: self.mobile.clone(),
        }
    }

    pub fn renames(&self) -> bool {
        !names_match(self.name.trim(), &self.prior_name)
    }
}
