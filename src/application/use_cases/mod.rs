pub mod languages;
pub mod search;
pub mod tags;
pub mod translations;
