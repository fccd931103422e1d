use std::sync::Arc;

use async_trait::async_trait;

use crate::application::ports::content_cache::CacheUnavailable;
use crate::application::ports::language_registry::LanguageRegistry;
use crate::domain::locale::{Language, SiteDomain};

use super::store::SnapshotStore;

/// `LanguageRegistry` over the loaded site snapshot.
pub struct SnapshotLanguageRegistry {
    store: Arc<SnapshotStore>,
}

impl SnapshotLanguageRegistry {
    pub fn new(store: Arc<SnapshotStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl LanguageRegistry for SnapshotLanguageRegistry {
    async fn languages(&self) -> anyhow::Result<Vec<Language>> {
        let index = self
            .store
            .current()
            .await
            .ok_or_else(|| anyhow::Error::new(CacheUnavailable))?;
        Ok(index.languages())
    }

    async fn domains(&self) -> anyhow::Result<Vec<SiteDomain>> {
        let index = self
            .store
            .current()
            .await
            .ok_or_else(|| anyhow::Error::new(CacheUnavailable))?;
        Ok(index.domains())
    }
}
