use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use crate::application::ports::content_cache::{CacheUnavailable, ContentCache};
use crate::domain::content::node::ContentNode;

use super::store::{SnapshotIndex, SnapshotStore};

/// `ContentCache` over the loaded site snapshot.
pub struct SnapshotContentCache {
    store: Arc<SnapshotStore>,
}

impl SnapshotContentCache {
    pub fn new(store: Arc<SnapshotStore>) -> Self {
        Self { store }
    }

    async fn index(&self) -> anyhow::Result<Arc<SnapshotIndex>> {
        self.store
            .current()
            .await
            .ok_or_else(|| anyhow::Error::new(CacheUnavailable))
    }
}

#[async_trait]
impl ContentCache for SnapshotContentCache {
    async fn by_id(&self, id: i64) -> anyhow::Result<Option<Arc<ContentNode>>> {
        Ok(self.index().await?.node_by_id(id))
    }

    async fn by_key(&self, key: Uuid) -> anyhow::Result<Option<Arc<ContentNode>>> {
        Ok(self.index().await?.node_by_key(key))
    }

    async fn children(
        &self,
        id: i64,
        culture: Option<&str>,
    ) -> anyhow::Result<Vec<Arc<ContentNode>>> {
        Ok(self.index().await?.children_of(id, culture))
    }

    async fn descendants(
        &self,
        id: i64,
        culture: Option<&str>,
    ) -> anyhow::Result<Vec<Arc<ContentNode>>> {
        Ok(self.index().await?.descendants_of(id, culture))
    }
}
