use async_trait::async_trait;

use crate::domain::locale::DictionaryItem;

#[async_trait]
pub trait DictionaryStore: Send + Sync {
    /// Every dictionary item, nested folders flattened.
    async fn items(&self) -> anyhow::Result<Vec<DictionaryItem>>;
}
