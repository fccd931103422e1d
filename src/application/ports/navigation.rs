use async_trait::async_trait;
use uuid::Uuid;

/// Root-level structure of the published tree.
#[async_trait]
pub trait NavigationQuery: Send + Sync {
    /// Keys of the root nodes, in tree order.
    async fn root_keys(&self) -> anyhow::Result<Vec<Uuid>>;
}
