use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::extract::MatchedPath;
use dotenvy::dotenv;
use http::HeaderValue;
use tokio::task::JoinHandle;
use tokio::time::{Duration, sleep};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use content_api::bootstrap::app_context::{AppContext, AppServices};
use content_api::bootstrap::config::Config;
use content_api::infrastructure::snapshot::content_cache::SnapshotContentCache;
use content_api::infrastructure::snapshot::dictionary::SnapshotDictionary;
use content_api::infrastructure::snapshot::languages::SnapshotLanguageRegistry;
use content_api::infrastructure::snapshot::navigation::SnapshotNavigation;
use content_api::infrastructure::snapshot::store::SnapshotStore;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
        paths(
            content_api::presentation::http::content_search::search_get,
            content_api::presentation::http::content_search::search_post,
            content_api::presentation::http::content_search::list_all_tags,
            content_api::presentation::http::tags::list_tags,
            content_api::presentation::http::tags::tag_stats,
            content_api::presentation::http::languages::list_languages,
            content_api::presentation::http::translations::get_translations,
            content_api::presentation::http::health::health,
        ),
        components(schemas(
            content_api::presentation::http::content_search::PageSearchRequest,
            content_api::presentation::http::content_search::PageSearchItem,
            content_api::presentation::http::content_search::PageSearchResponse,
            content_api::presentation::http::content_search::TagsResponse,
            content_api::presentation::http::tags::TagListResponse,
            content_api::presentation::http::tags::TagStat,
            content_api::presentation::http::tags::TagStatsResponse,
            content_api::presentation::http::languages::LanguageInfo,
            content_api::presentation::http::languages::LanguageResponse,
            content_api::presentation::http::health::HealthResp,
        )),
        tags(
            (name = "Content Search", description = "Page search over the published content tree"),
            (name = "Tags", description = "Tag listing and usage statistics"),
            (name = "Languages", description = "Site languages and language switching"),
            (name = "Translations", description = "Dictionary translations"),
            (name = "Health", description = "System health checks")
        )
    )]
struct ApiDoc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "content_api=debug,axum=info,tower_http=info".into()),
        )
        .init();

    let cfg = Config::from_env()?;
    info!(?cfg, "Starting content API");

    // Content snapshot
    let store = Arc::new(SnapshotStore::new(&cfg.content_file));
    if let Err(e) = store.load().await {
        warn!(error = ?e, file = %cfg.content_file, "Initial snapshot load failed, starting without content");
    }

    let services = AppServices::new(
        Arc::new(SnapshotContentCache::new(store.clone())),
        Arc::new(SnapshotNavigation::new(store.clone())),
        Arc::new(SnapshotDictionary::new(store.clone())),
        Arc::new(SnapshotLanguageRegistry::new(store.clone())),
    );

    let ctx = AppContext::new(cfg.clone(), services);

    // Build CORS
    let cors = if let Some(origin) = cfg.frontend_url.clone() {
        match HeaderValue::from_str(&origin) {
            Ok(v) => CorsLayer::new()
                .allow_origin(v)
                .allow_methods([http::Method::GET, http::Method::POST, http::Method::OPTIONS])
                .allow_headers([http::header::CONTENT_TYPE])
                .allow_credentials(true),
            Err(_) => CorsLayer::new()
                .allow_origin(AllowOrigin::mirror_request())
                .allow_methods([http::Method::GET, http::Method::POST, http::Method::OPTIONS])
                .allow_headers([http::header::CONTENT_TYPE])
                .allow_credentials(true),
        }
    } else {
        if cfg.is_production {
            // FRONTEND_URL is enforced earlier in production; deny all here
            CorsLayer::new()
                .allow_origin(AllowOrigin::exact(HeaderValue::from_static(
                    "http://invalid",
                )))
                .allow_methods([http::Method::GET, http::Method::POST, http::Method::OPTIONS])
                .allow_headers([http::header::CONTENT_TYPE])
        } else {
            // Development convenience
            CorsLayer::new()
                .allow_origin(AllowOrigin::mirror_request())
                .allow_methods([http::Method::GET, http::Method::POST, http::Method::OPTIONS])
                .allow_headers([http::header::CONTENT_TYPE])
                .allow_credentials(true)
        }
    };

    // Build API router
    let app = Router::new()
        .nest(
            "/api",
            content_api::presentation::http::health::routes(store.clone()),
        )
        .nest(
            "/api",
            content_api::presentation::http::content_search::routes(ctx.clone()),
        )
        .nest(
            "/api",
            content_api::presentation::http::tags::routes(ctx.clone()),
        )
        .nest(
            "/api",
            content_api::presentation::http::languages::routes(ctx.clone()),
        )
        .nest(
            "/api",
            content_api::presentation::http::translations::routes(ctx.clone()),
        )
        .merge(SwaggerUi::new("/api/docs").url("/api/openapi.json", ApiDoc::openapi()))
        .layer(cors)
        .layer(
            TraceLayer::new_for_http().make_span_with(|req: &http::Request<_>| {
                let method = req.method().clone();
                let uri = req.uri().clone();
                let matched = req
                    .extensions()
                    .get::<MatchedPath>()
                    .map(|p| p.as_str().to_string())
                    .unwrap_or_default();
                tracing::info_span!("http", %method, %uri, matched_path = %matched)
            }),
        );

    let api_addr = SocketAddr::from(([0, 0, 0, 0], cfg.api_port));
    info!(%api_addr, "HTTP API listening");
    let listener = tokio::net::TcpListener::bind(api_addr).await?;

    let api_handle: JoinHandle<anyhow::Result<()>> = tokio::spawn(async move {
        axum::serve(listener, app).await?;
        Ok(())
    });

    // Background snapshot reload
    let reload_handle: Option<JoinHandle<anyhow::Result<()>>> = if cfg.content_reload_secs == 0 {
        None
    } else {
        let store_for_reload = store.clone();
        let interval = Duration::from_secs(cfg.content_reload_secs);
        Some(tokio::spawn(async move {
            loop {
                sleep(interval).await;
                match store_for_reload.reload_if_changed().await {
                    Ok(true) => info!("content_snapshot_reloaded"),
                    Ok(false) => {}
                    Err(e) => error!(error = ?e, "content_reload_failed"),
                }
            }
        }))
    };

    match api_handle.await {
        Ok(Ok(())) => {}
        Ok(Err(e)) => error!(?e, "API server task failed"),
        Err(e) => error!(?e, "API server task panicked"),
    }

    if let Some(handle) = reload_handle {
        match handle.await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => error!(?e, "Reload task failed"),
            Err(e) => error!(?e, "Reload task panicked"),
        }
    }
    Ok(())
}
