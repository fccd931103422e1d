pub mod content;
pub mod locale;
pub mod search;
