use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    routing::get,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::ports::content_cache::CacheUnavailable;
use crate::application::use_cases::search::search_pages::{SearchError, SearchPages};
use crate::application::use_cases::tags::collect_tags::CollectTags;
use crate::bootstrap::app_context::AppContext;
use crate::domain::search::{SearchCriteria, SearchResultItem, SearchResultPage};

#[derive(Debug, Deserialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct PageSearchRequest {
    /// Free-text query matched against titles, names and body content
    pub query: Option<String>,
    /// Comma-separated tag list (single OR-group)
    pub tags: Option<String>,
    /// Boolean tag expression, e.g. `(("sport" or "outdoor") and ("sale"))`;
    /// takes precedence over `tags`
    pub tag_groups: Option<String>,
    /// Culture code, e.g. `en-US`
    pub lang: Option<String>,
    /// Node to search below; first root when absent
    pub start_node_id: Option<i64>,
    pub exclude_node: Option<i64>,
    pub skip: i64,
    pub take: i64,
    pub include_children: bool,
    /// name | createDate | updateDate | level | pageTitle
    pub order_by: Option<String>,
    /// asc | desc
    pub order_direction: Option<String>,
}

impl Default for PageSearchRequest {
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

impl From<PageSearchRequest> for SearchCriteria {
    fn from(r: PageSearchRequest) -> Self {
        SearchCriteria {
            query: r.query,
            tags: r.tags,
            tag_groups: r.tag_groups,
            lang: r.lang,
            start_node_id: r.start_node_id,
            exclude_node: r.exclude_node,
            skip: r.skip,
            take: r.take,
            include_children: r.include_children,
            order_by: r.order_by,
            order_direction: r.order_direction,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PageSearchItem {
    pub id: i64,
    pub name: String,
    pub url: String,
    pub content_type: String,
    pub page_title: Option<String>,
    pub sub_title: Option<String>,
    pub excerpt: Option<String>,
    pub page_image_url: Option<String>,
    pub tags: Vec<String>,
    pub update_date: chrono::DateTime<chrono::Utc>,
    pub create_date: chrono::DateTime<chrono::Utc>,
    pub culture: String,
    pub level: i32,
    pub parent_id: Option<i64>,
}

impl From<SearchResultItem> for PageSearchItem {
    fn from(i: SearchResultItem) -> Self {
        PageSearchItem {
            id: i.id,
            name: i.name,
            url: i.url,
            content_type: i.content_type,
            page_title: i.page_title,
            sub_title: i.sub_title,
            excerpt: i.excerpt,
            page_image_url: i.page_image_url,
            tags: i.tags,
            update_date: i.update_date,
            create_date: i.create_date,
            culture: i.culture,
            level: i.level,
            parent_id: i.parent_id,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PageSearchResponse {
    pub total: usize,
    pub skip: i64,
    pub take: i64,
    pub items: Vec<PageSearchItem>,
}

impl From<SearchResultPage> for PageSearchResponse {
    fn from(p: SearchResultPage) -> Self {
        PageSearchResponse {
            total: p.total,
            skip: p.skip,
            take: p.take,
            items: p.items.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TagsResponse {
    pub total: usize,
    pub tags: Vec<String>,
}

#[utoipa::path(get, path = "/api/contentsearch", tag = "Content Search",
    params(
        ("query" = Option<String>, Query, description = "Free-text query"),
        ("tags" = Option<String>, Query, description = "Comma-separated tag list"),
        ("tagGroups" = Option<String>, Query, description = "Boolean tag expression"),
        ("lang" = Option<String>, Query, description = "Culture code"),
        ("startNodeId" = Option<i64>, Query, description = "Node to search below"),
        ("excludeNode" = Option<i64>, Query, description = "Node id to drop from results"),
        ("skip" = Option<i64>, Query, description = "Items to skip (default 0)"),
        ("take" = Option<i64>, Query, description = "Items to return (default 10, max 100)"),
        ("includeChildren" = Option<bool>, Query, description = "Search descendants (default true)"),
        ("orderBy" = Option<String>, Query, description = "name | createDate | updateDate | level | pageTitle"),
        ("orderDirection" = Option<String>, Query, description = "asc | desc")
    ),
    responses((status = 200, body = PageSearchResponse), (status = 400, description = "Invalid request or content unavailable")))]
pub async fn search_get(
    State(ctx): State<AppContext>,
    q: Option<Query<PageSearchRequest>>,
) -> Result<Json<PageSearchResponse>, (StatusCode, String)> {
    let request = q.map(|Query(r)| r).unwrap_or_default();
    run_search(&ctx, request).await
}

#[utoipa::path(post, path = "/api/contentsearch", tag = "Content Search",
    request_body = PageSearchRequest,
    responses((status = 200, body = PageSearchResponse), (status = 400, description = "Invalid request or content unavailable")))]
pub async fn search_post(
    State(ctx): State<AppContext>,
    q: Option<Query<PageSearchRequest>>,
    body: Option<Json<PageSearchRequest>>,
) -> Result<Json<PageSearchResponse>, (StatusCode, String)> {
    // Body wins over query parameters, matching the GET shape either way
    let request = body
        .map(|Json(r)| r)
        .or_else(|| q.map(|Query(r)| r))
        .unwrap_or_default();
    run_search(&ctx, request).await
}

async fn run_search(
    ctx: &AppContext,
    request: PageSearchRequest,
) -> Result<Json<PageSearchResponse>, (StatusCode, String)> {
    let criteria: SearchCriteria = request.into();
    let cache = ctx.content_cache();
    let navigation = ctx.navigation();
    let uc = SearchPages {
        cache: cache.as_ref(),
        navigation: navigation.as_ref(),
        default_culture: &ctx.cfg.default_culture,
    };
    let page = uc.execute(&criteria).await.map_err(search_error)?;
    Ok(Json(page.into()))
}

fn search_error(err: SearchError) -> (StatusCode, String) {
    match err {
        SearchError::Other(err) => {
            tracing::error!(error = ?err, "content_search_failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "An error occurred during search".to_string(),
            )
        }
        err => (StatusCode::BAD_REQUEST, err.to_string()),
    }
}

#[utoipa::path(get, path = "/api/contentsearch/tags", tag = "Content Search",
    responses((status = 200, body = TagsResponse), (status = 400, description = "Content unavailable")))]
pub async fn list_all_tags(
    State(ctx): State<AppContext>,
) -> Result<Json<TagsResponse>, (StatusCode, String)> {
    let cache = ctx.content_cache();
    let navigation = ctx.navigation();
    let uc = CollectTags {
        cache: cache.as_ref(),
        navigation: navigation.as_ref(),
    };
    let tags = uc.unique(None, None).await.map_err(|err| {
        if err.is::<CacheUnavailable>() {
            (
                StatusCode::BAD_REQUEST,
                "Content cache not available".to_string(),
            )
        } else {
            tracing::error!(error = ?err, "site_tag_listing_failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "An error occurred while listing tags".to_string(),
            )
        }
    })?;
    Ok(Json(TagsResponse {
        total: tags.len(),
        tags,
    }))
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/contentsearch", get(search_get).post(search_post))
        .route("/contentsearch/tags", get(list_all_tags))
        .with_state(ctx)
}
