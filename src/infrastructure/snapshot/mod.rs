pub mod content_cache;
pub mod dictionary;
pub mod languages;
pub mod navigation;
pub mod store;
