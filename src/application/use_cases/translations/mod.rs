pub mod get_translations;
