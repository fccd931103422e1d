use chrono::{DateTime, Utc};

/// Parameters of one content search, independent of how the request came in.
#[derive(Debug, Clone)]
pub struct SearchCriteria {
    pub query: Option<String>,
    pub tags: Option<String>,
    pub tag_groups: Option<String>,
    pub lang: Option<String>,
    pub start_node_id: Option<i64>,
    pub exclude_node: Option<i64>,
    pub skip: i64,
    pub take: i64,
    pub include_children: bool,
    pub order_by: Option<String>,
    pub order_direction: Option<String>,
}

impl Default for SearchCriteria {
    fn default() -> Self {
        Self {
            query: None,
            tags: None,
            tag_groups: None,
            lang: None,
            start_node_id: None,
            exclude_node: None,
            skip: 0,
            take: 10,
            include_children: true,
            order_by: None,
            order_direction: None,
        }
    }
}

/// One page of a search result, shaped for the resolved culture.
#[derive(Debug, Clone)]
pub struct SearchResultItem {
    pub id: i64,
    pub name: String,
    pub url: String,
    pub content_type: String,
    pub page_title: Option<String>,
    pub sub_title: Option<String>,
    pub excerpt: Option<String>,
    pub page_image_url: Option<String>,
    pub tags: Vec<String>,
    pub update_date: DateTime<Utc>,
    pub create_date: DateTime<Utc>,
    pub culture: String,
    pub level: i32,
    pub parent_id: Option<i64>,
}

/// A window over the filtered, ordered match set. `total` counts matches
/// before pagination.
#[derive(Debug, Clone)]
pub struct SearchResultPage {
    pub total: usize,
    pub skip: i64,
    pub take: i64,
    pub items: Vec<SearchResultItem>,
}
