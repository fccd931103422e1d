use std::sync::Arc;

use crate::application::ports::content_cache::ContentCache;
use crate::application::ports::dictionary::DictionaryStore;
use crate::application::ports::language_registry::LanguageRegistry;
use crate::application::ports::navigation::NavigationQuery;
use crate::bootstrap::config::Config;

#[derive(Clone)]
pub struct AppContext {
    pub cfg: Config,
    services: Arc<AppServices>,
}

#[derive(Clone)]
pub struct AppServices {
    content_cache: Arc<dyn ContentCache>,
    navigation: Arc<dyn NavigationQuery>,
    dictionary: Arc<dyn DictionaryStore>,
    languages: Arc<dyn LanguageRegistry>,
}

impl AppServices {
    pub fn new(
        content_cache: Arc<dyn ContentCache>,
        navigation: Arc<dyn NavigationQuery>,
        dictionary: Arc<dyn DictionaryStore>,
        languages: Arc<dyn LanguageRegistry>,
    ) -> Self {
        Self {
            content_cache,
            navigation,
            dictionary,
            languages,
        }
    }
}

impl AppContext {
    pub fn new(cfg: Config, services: AppServices) -> Self {
        Self {
            cfg,
            services: Arc::new(services),
        }
    }

    pub fn content_cache(&self) -> Arc<dyn ContentCache> {
        self.services.content_cache.clone()
    }

    pub fn navigation(&self) -> Arc<dyn NavigationQuery> {
        self.services.navigation.clone()
    }

    pub fn dictionary(&self) -> Arc<dyn DictionaryStore> {
        self.services.dictionary.clone()
    }

    pub fn languages(&self) -> Arc<dyn LanguageRegistry> {
        self.services.languages.clone()
    }
}
