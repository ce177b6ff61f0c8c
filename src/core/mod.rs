pub mod contact;
pub mod error;

pub use contact::{Contact, ContactForm, UpdateContactForm, names_match};
pub use error::{Result, StoreError};
