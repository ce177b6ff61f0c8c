use super::{ContactStore, remove_named, replace_named};
use crate::core::{Contact, Result};
use async_trait::async_trait;
use tokio::sync::RwLock;

/// Volatile store with the same ordering and matching rules as [`super::FileContactStore`].
#[derive(Default)]
pub struct InMemoryContactStore {
    contacts: RwLock<Vec<Contact>>,
}

impl InMemoryContactStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_contacts(contacts: Vec<Contact>) -> Self {
        Self {
            contacts: RwLock::new(contacts),
        }
    }
}

#[async_trait]
impl ContactStore for InMemoryContactStore {
    async fn load_all(&self) -> Result<Vec<Contact>> {
        Ok(self.contacts.read().await.clone())
    }

    async fn insert(&self, contact: Contact) -> Result<()> {
        self.contacts.write().await.push(contact);
        Ok(())
    }

    async fn delete_by_name(&self, name: &str) -> Result<usize> {
        let mut contacts = self.contacts.write().await;
        Ok(remove_named(&mut contacts, name))
    }

    async fn update(&self, old_name: &str, contact: Contact) -> Result<()> {
        let mut contacts = self.contacts.write().await;
        replace_named(&mut contacts, old_name, contact);
        Ok(())
    }
}
