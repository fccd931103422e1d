pub mod content_search;
pub mod health;
pub mod languages;
pub mod tags;
pub mod translations;
