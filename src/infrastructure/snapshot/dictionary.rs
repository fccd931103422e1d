use std::sync::Arc;

use async_trait::async_trait;

use crate::application::ports::content_cache::CacheUnavailable;
use crate::application::ports::dictionary::DictionaryStore;
use crate::domain::locale::DictionaryItem;

use super::store::SnapshotStore;

/// `DictionaryStore` over the loaded site snapshot.
pub struct SnapshotDictionary {
    store: Arc<SnapshotStore>,
}

impl SnapshotDictionary {
    pub fn new(store: Arc<SnapshotStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl DictionaryStore for SnapshotDictionary {
    async fn items(&self) -> anyhow::Result<Vec<DictionaryItem>> {
        let index = self
            .store
            .current()
            .await
            .ok_or_else(|| anyhow::Error::new(CacheUnavailable))?;
        Ok(index.dictionary_items())
    }
}
