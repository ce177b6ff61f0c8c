//! JSON flat-file contact store.
//!
//! The document is a single JSON array. Each write serializes the whole collection into a
//! temporary file next to the target and renames it over the target.
//!
//! Read-modify-write cycles are serialized by an in-process mutex only. Several processes
//! pointed at the same file can still lose each other's updates, and the duplicate check
//! performed by the validation gate happens outside the cycle, so two concurrent adds of
//! the same name can both be accepted.

use super::{ContactStore, remove_named, replace_named};
use crate::core::{Contact, Result, StoreError};
use async_trait::async_trait;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tokio::fs;
use tokio::sync::Mutex;
use tracing::{debug, info};

pub struct FileContactStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileContactStore {
    /// Opens the store at `path`, creating the parent directory and an empty document
    /// when nothing is there yet.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let store = Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        };
        {
            let _guard = store.write_lock.lock().await;
            store.load_locked().await?;
        }
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the document, bootstrapping it when absent. Caller holds `write_lock`.
    async fn load_locked(&self) -> Result<Vec<Contact>> {
        match self.read_document().await {
            Err(StoreError::Io { source, .. }) if source.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "initializing empty contact store");
                self.write_document(&[]).await?;
                Ok(Vec::new())
            }
            other => other,
        }
    }

    async fn read_document(&self) -> Result<Vec<Contact>> {
        let bytes = fs::read(&self.path)
            .await
            .map_err(|err| StoreError::io(&self.path, err))?;
        serde_json::from_slice(&bytes).map_err(|source| StoreError::Corrupt {
            path: self.path.clone(),
            source,
        })
    }

    async fn write_document(&self, contacts: &[Contact]) -> Result<()> {
        let bytes = serde_json::to_vec(contacts)?;
        let path = self.path.clone();
        tokio::task::spawn_blocking(move || atomic_write(&path, &bytes)).await?
    }
}

#[async_trait]
impl ContactStore for FileContactStore {
    async fn load_all(&self) -> Result<Vec<Contact>> {
        match self.read_document().await {
            Err(StoreError::Io { source, .. }) if source.kind() == ErrorKind::NotFound => {
                let _guard = self.write_lock.lock().await;
                self.load_locked().await
            }
            other => other,
        }
    }

    async fn insert(&self, contact: Contact) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        let mut contacts = self.load_locked().await?;
        info!(name = %contact.name, "inserting contact");
        contacts.push(contact);
        self.write_document(&contacts).await
    }

    async fn delete_by_name(&self, name: &str) -> Result<usize> {
        let _guard = self.write_lock.lock().await;
        let mut contacts = self.load_locked().await?;
        let removed = remove_named(&mut contacts, name);
        if removed > 0 {
            info!(name, removed, "deleting contact");
            self.write_document(&contacts).await?;
        }
        Ok(removed)
    }

    async fn update(&self, old_name: &str, contact: Contact) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        let mut contacts = self.load_locked().await?;
        info!(old_name, name = %contact.name, "replacing contact");
        replace_named(&mut contacts, old_name, contact);
        self.write_document(&contacts).await
    }
}

fn atomic_write(path: &Path, bytes: &[u8]) -> Result<()> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(parent).map_err(|err| StoreError::io(parent, err))?;

    let mut tmp = NamedTempFile::new_in(parent).map_err(|err| StoreError::io(parent, err))?;
    tmp.write_all(bytes)
        .map_err(|err| StoreError::io(tmp.path(), err))?;
    tmp.as_file()
        .sync_all()
        .map_err(|err| StoreError::io(tmp.path(), err))?;
    tmp.persist(path)
        .map_err(|err| StoreError::io(path, err.error))?;
    Ok(())
}
