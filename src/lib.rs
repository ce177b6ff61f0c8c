// ============================================================================
// Contact Book Library
// ============================================================================

pub mod config;
pub mod core;
pub mod storage;
pub mod validation;
pub mod web;

// Re-export main types for convenience
pub use config::AppConfig;
pub use crate::core::{Contact, ContactForm, Result, StoreError, UpdateContactForm};
pub use storage::{ContactStore, FileContactStore, InMemoryContactStore};
pub use validation::{Field, Rejection, Verdict, Violation};
pub use web::{AppState, FlashMessages, WebError, build_router};
