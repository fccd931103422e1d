use std::collections::BTreeMap;

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    routing::get,
};
use serde::Deserialize;

use crate::application::use_cases::translations::get_translations::GetTranslations;
use crate::bootstrap::app_context::AppContext;

#[derive(Debug, Deserialize)]
pub struct TranslationsQuery {
    pub culture: Option<String>,
}

#[utoipa::path(get, path = "/api/translation/translations", tag = "Translations",
    params(("culture" = Option<String>, Query, description = "Culture code; server default when absent")),
    responses((status = 200, description = "Flat dictionary key to value map")))]
pub async fn get_translations(
    State(ctx): State<AppContext>,
    Query(q): Query<TranslationsQuery>,
) -> Result<Json<BTreeMap<String, String>>, (StatusCode, String)> {
    let culture = q.culture.as_deref().unwrap_or(&ctx.cfg.default_culture);
    let store = ctx.dictionary();
    let uc = GetTranslations {
        store: store.as_ref(),
    };
    let translations = uc.execute(culture).await.map_err(|err| {
        tracing::error!(error = ?err, culture, "translation_loading_failed");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Error loading translations".to_string(),
        )
    })?;
    Ok(Json(translations))
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/translation/translations", get(get_translations))
        .with_state(ctx)
}
