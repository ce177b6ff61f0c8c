use std::sync::Arc;

use crate::storage::ContactStore;
use crate::web::FlashMessages;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ContactStore>,
    pub flash: Arc<FlashMessages>,
}

impl AppState {
    pub fn new(store: Arc<dyn ContactStore>, flash: FlashMessages) -> Self {
        Self {
            store,
            flash: Arc::new(flash),
        }
    }
}
