pub mod list_languages;
