//! Whole-collection contact persistence.
//!
//! Every store reads and writes the complete collection. Mutations are
//! read-modify-write cycles: load everything, change it in memory, write everything back.

pub mod file;
pub mod memory;

pub use file::FileContactStore;
pub use memory::InMemoryContactStore;

use crate::core::{Contact, Result};
use async_trait::async_trait;

#[async_trait]
pub trait ContactStore: Send + Sync {
    /// Full collection in persisted order.
    async fn load_all(&self) -> Result<Vec<Contact>>;

    /// Appends `contact`. Callers check uniqueness first; the store does not.
    async fn insert(&self, contact: Contact) -> Result<()>;

    /// Removes every contact named `name` and returns how many were removed.
    async fn delete_by_name(&self, name: &str) -> Result<usize>;

    /// Removes every contact named `old_name`, then appends `contact`.
    async fn update(&self, old_name: &str, contact: Contact) -> Result<()>;

    async fn find_by_name(&self, name: &str) -> Result<Option<Contact>> {
        let contacts = self.load_all().await?;
        Ok(contacts.into_iter().find(|contact| contact.is_named(name)))
    }

    async fn exists_by_name(&self, name: &str) -> Result<bool> {
        let contacts = self.load_all().await?;
        Ok(contacts.iter().any(|contact| contact.is_named(name)))
    }
}

/// Drops every contact named `name`, keeping the relative order of the rest.
pub(crate) fn remove_named(contacts: &mut Vec<Contact>, name: &str) -> usize {
    let before = contacts.len();
    contacts.retain(|contact| !contact.is_named(name));
    before - contacts.len()
}

/// Replacement used by every store: the new record always lands at the end.
pub(crate) fn replace_named(contacts: &mut Vec<Contact>, old_name: &str, contact: Contact) {
    remove_named(contacts, old_name);
    contacts.push(contact);
}
