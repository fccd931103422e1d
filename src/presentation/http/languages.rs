use axum::{
    Json, Router,
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::dto::languages::{LanguageInfoDto, LanguageListDto};
use crate::application::ports::content_cache::CacheUnavailable;
use crate::application::use_cases::languages::list_languages::ListLanguages;
use crate::bootstrap::app_context::AppContext;

#[derive(Debug, Deserialize)]
pub struct LanguagesQuery {
    /// Visitor URL the current language is detected from
    pub url: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LanguageInfo {
    pub iso_code: String,
    pub name: String,
    pub native_name: String,
    pub url: String,
    pub is_current: bool,
}

impl From<LanguageInfoDto> for LanguageInfo {
    fn from(d: LanguageInfoDto) -> Self {
        LanguageInfo {
            iso_code: d.iso_code,
            name: d.name,
            native_name: d.native_name,
            url: d.url,
            is_current: d.is_current,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LanguageResponse {
    pub languages: Vec<LanguageInfo>,
    pub current_language: String,
}

impl From<LanguageListDto> for LanguageResponse {
    fn from(d: LanguageListDto) -> Self {
        LanguageResponse {
            languages: d.languages.into_iter().map(Into::into).collect(),
            current_language: d.current_language,
        }
    }
}

#[utoipa::path(get, path = "/api/languageapi", tag = "Languages",
    params(("url" = Option<String>, Query, description = "Visitor URL for current-language detection")),
    responses((status = 200, body = LanguageResponse), (status = 400, description = "Language registry unavailable")))]
pub async fn list_languages(
    State(ctx): State<AppContext>,
    Query(q): Query<LanguagesQuery>,
    headers: HeaderMap,
) -> Result<Json<LanguageResponse>, Response> {
    let base_url = base_url(&ctx, &headers);
    let registry = ctx.languages();
    let uc = ListLanguages {
        registry: registry.as_ref(),
        default_culture: &ctx.cfg.default_culture,
    };
    let list = uc
        .execute(q.url.as_deref(), &base_url)
        .await
        .map_err(|err| {
            if err.is::<CacheUnavailable>() {
                (StatusCode::BAD_REQUEST, "Language registry not available").into_response()
            } else {
                tracing::error!(error = ?err, "language_listing_failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(serde_json::json!({
                        "error": "An error occurred while retrieving languages"
                    })),
                )
                    .into_response()
            }
        })?;
    Ok(Json(list.into()))
}

/// Absolute origin used when a language has no assigned domain: the
/// configured public base URL, else the request host.
fn base_url(ctx: &AppContext, headers: &HeaderMap) -> String {
    if let Some(configured) = ctx.cfg.public_base_url.clone() {
        return configured;
    }
    headers
        .get(axum::http::header::HOST)
        .and_then(|h| h.to_str().ok())
        .map(|host| format!("http://{host}"))
        .unwrap_or_default()
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/languageapi", get(list_languages))
        .with_state(ctx)
}
