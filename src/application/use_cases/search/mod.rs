pub mod search_pages;
