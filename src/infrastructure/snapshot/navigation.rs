use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use crate::application::ports::content_cache::CacheUnavailable;
use crate::application::ports::navigation::NavigationQuery;

use super::store::SnapshotStore;

/// `NavigationQuery` over the loaded site snapshot.
pub struct SnapshotNavigation {
    store: Arc<SnapshotStore>,
}

impl SnapshotNavigation {
    pub fn new(store: Arc<SnapshotStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl NavigationQuery for SnapshotNavigation {
    async fn root_keys(&self) -> anyhow::Result<Vec<Uuid>> {
        let index = self
            .store
            .current()
            .await
            .ok_or_else(|| anyhow::Error::new(CacheUnavailable))?;
        Ok(index.root_keys())
    }
}
