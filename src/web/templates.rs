use crate::core::{Contact, ContactForm, UpdateContactForm};
use crate::validation::Violation;
use askama::Template;

#[derive(Template)]
#[template(path = "index.html")]
pub struct HomePage {
    pub title: &'static str,
}

#[derive(Template)]
#[template(path = "about.html")]
pub struct AboutPage {
    pub title: &'static str,
}

#[derive(Template)]
#[template(path = "contact.html")]
pub struct ContactListPage {
    pub title: &'static str,
    pub contacts: Vec<Contact>,
    pub message: Option<String>,
}

#[derive(Template)]
#[template(path = "add_contact.html")]
pub struct AddContactPage {
    pub title: &'static str,
    pub errors: Vec<Violation>,
    pub form: ContactForm,
}

impl AddContactPage {
    pub fn blank() -> Self {
        Self::with_errors(Vec::new(), ContactForm::default())
    }

    pub fn with_errors(errors: Vec<Violation>, form: ContactForm) -> Self {
        Self {
            title: "Add Contact",
            errors,
            form,
        }
    }
}

#[derive(Template)]
#[template(path = "edit_contact.html")]
pub struct EditContactPage {
    pub title: &'static str,
    pub errors: Vec<Violation>,
    pub form: UpdateContactForm,
}

impl EditContactPage {
    pub fn with_errors(errors: Vec<Violation>, form: UpdateContactForm) -> Self {
        Self {
            title: "Edit Contact",
            errors,
            form,
        }
    }
}

#[derive(Template)]
#[template(path = "detail.html")]
pub struct DetailPage {
    pub title: &'static str,
    pub contact: Contact,
    pub found: bool,
}

#[derive(Template)]
#[template(path = "error_msg.html")]
pub struct ErrorPage {
    pub title: String,
    pub message: String,
}
