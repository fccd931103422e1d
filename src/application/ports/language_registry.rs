use async_trait::async_trait;

use crate::domain::locale::{Language, SiteDomain};

#[async_trait]
pub trait LanguageRegistry: Send + Sync {
    /// Configured site languages, default language first.
    async fn languages(&self) -> anyhow::Result<Vec<Language>>;

    /// Hostname assignments per culture.
    async fn domains(&self) -> anyhow::Result<Vec<SiteDomain>>;
}
