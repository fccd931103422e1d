use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    routing::get,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::application::dto::tags::TagUsageDto;
use crate::application::ports::content_cache::CacheUnavailable;
use crate::application::use_cases::tags::collect_tags::CollectTags;
use crate::bootstrap::app_context::AppContext;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TagsQuery {
    pub culture: Option<String>,
    /// Node key to scope the walk to; all roots when absent
    pub node_id: Option<Uuid>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TagListResponse {
    pub total: usize,
    /// Echoes the requested culture, `all` when none was given
    pub culture: String,
    pub node_id: Option<Uuid>,
    pub tags: Vec<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TagStat {
    pub tag: String,
    pub count: i64,
}

impl From<TagUsageDto> for TagStat {
    fn from(d: TagUsageDto) -> Self {
        TagStat {
            tag: d.tag,
            count: d.count,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TagStatsResponse {
    pub total: usize,
    pub culture: String,
    pub node_id: Option<Uuid>,
    pub stats: Vec<TagStat>,
}

#[utoipa::path(get, path = "/api/tags", tag = "Tags",
    params(
        ("culture" = Option<String>, Query, description = "Culture code, e.g. da-DK"),
        ("nodeId" = Option<Uuid>, Query, description = "Node key to scope to")
    ),
    responses((status = 200, body = TagListResponse)))]
pub async fn list_tags(
    State(ctx): State<AppContext>,
    Query(q): Query<TagsQuery>,
) -> Result<Json<TagListResponse>, (StatusCode, Json<serde_json::Value>)> {
    let cache = ctx.content_cache();
    let navigation = ctx.navigation();
    let uc = CollectTags {
        cache: cache.as_ref(),
        navigation: navigation.as_ref(),
    };
    let tags = uc
        .unique(q.node_id, q.culture.as_deref())
        .await
        .map_err(tags_error)?;
    Ok(Json(TagListResponse {
        total: tags.len(),
        culture: q.culture.unwrap_or_else(|| "all".to_string()),
        node_id: q.node_id,
        tags,
    }))
}

#[utoipa::path(get, path = "/api/tags/stats", tag = "Tags",
    params(
        ("culture" = Option<String>, Query, description = "Culture code, e.g. da-DK"),
        ("nodeId" = Option<Uuid>, Query, description = "Node key to scope to")
    ),
    responses((status = 200, body = TagStatsResponse)))]
pub async fn tag_stats(
    State(ctx): State<AppContext>,
    Query(q): Query<TagsQuery>,
) -> Result<Json<TagStatsResponse>, (StatusCode, Json<serde_json::Value>)> {
    let cache = ctx.content_cache();
    let navigation = ctx.navigation();
    let uc = CollectTags {
        cache: cache.as_ref(),
        navigation: navigation.as_ref(),
    };
    let usage = uc
        .usage(q.node_id, q.culture.as_deref())
        .await
        .map_err(tags_error)?;
    Ok(Json(TagStatsResponse {
        total: usage.len(),
        culture: q.culture.unwrap_or_else(|| "all".to_string()),
        node_id: q.node_id,
        stats: usage.into_iter().map(Into::into).collect(),
    }))
}

fn tags_error(err: anyhow::Error) -> (StatusCode, Json<serde_json::Value>) {
    let message = if err.is::<CacheUnavailable>() {
        "Content cache not available"
    } else {
        tracing::error!(error = ?err, "tag_collection_failed");
        "Internal server error"
    };
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(serde_json::json!({ "error": message })),
    )
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/tags", get(list_tags))
        .route("/tags/stats", get(tag_stats))
        .with_state(ctx)
}
