pub mod content_cache;
pub mod dictionary;
pub mod language_registry;
pub mod navigation;
