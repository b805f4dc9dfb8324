use std::sync::Arc;

use stockpile_store::{HashStore, InMemoryHashStore};

/// Dependencies shared by every handler.
#[derive(Clone)]
pub struct AppState {
    store: Arc<dyn HashStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn HashStore>) -> Self {
        Self { store }
    }

    /// State backed by a fresh [`InMemoryHashStore`].
    pub fn in_memory() -> Self {
        Self::new(Arc::new(InMemoryHashStore::new()))
    }

    pub fn store(&self) -> &dyn HashStore {
        self.store.as_ref()
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState").finish_non_exhaustive()
    }
}
