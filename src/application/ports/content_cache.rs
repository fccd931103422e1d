use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::content::node::ContentNode;

/// Raised by snapshot-backed adapters when no content has been loaded yet.
/// Callers downcast to tell "no cache" apart from real failures.
#[derive(thiserror::Error, Debug)]
#[error("Content cache not available")]
pub struct CacheUnavailable;

/// Read access to the published-content projection. The cache owns the
/// nodes; callers never mutate them.
#[async_trait]
pub trait ContentCache: Send + Sync {
    async fn by_id(&self, id: i64) -> anyhow::Result<Option<Arc<ContentNode>>>;

    async fn by_key(&self, key: Uuid) -> anyhow::Result<Option<Arc<ContentNode>>>;

    /// Direct children in tree order, restricted to nodes published in
    /// `culture` when one is given.
    async fn children(&self, id: i64, culture: Option<&str>)
    -> anyhow::Result<Vec<Arc<ContentNode>>>;

    /// Culture-aware bulk enumeration of the whole subtree below `id`.
    /// Unlike a `children` walk this sees through ancestors that are not
    /// published in the culture. Callers fall back to a manual walk when
    /// this reports an error.
    async fn descendants(
        &self,
        id: i64,
        culture: Option<&str>,
    ) -> anyhow::Result<Vec<Arc<ContentNode>>>;
}
