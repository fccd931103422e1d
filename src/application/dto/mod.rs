pub mod languages;
pub mod tags;
