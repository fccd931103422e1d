pub mod blocks;
pub mod ordering;
pub mod tag_expr;
pub mod tags;
pub mod text;

/// Document-type alias of searchable pages.
pub const PAGE_CONTENT_TYPE: &str = "contentPage";

// Property aliases of the page document type.
pub const PAGE_TITLE_ALIAS: &str = "pageTitle";
pub const SUB_TITLE_ALIAS: &str = "subTitle";
pub const BODY_TEXT_ALIAS: &str = "bodyText";
pub const PAGE_IMAGE_ALIAS: &str = "pageImage";
pub const TAGS_ALIAS: &str = "tags";
