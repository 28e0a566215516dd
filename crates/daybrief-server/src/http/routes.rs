use super::{ApiResult, AppState};
use axum::{
    extract::State,
    response::Json,
    routing::{get, post},
    Router,
};
use daybrief_core::{ContentEntry, ProxyRequest, ProxyResponse};
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};
use tracing::{debug, error};

pub fn create_router(state: AppState) -> Router {
    // Permissive CORS: the reading UI is served from a different origin, so
    // preflight OPTIONS must succeed and every response needs allow-origin *.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health))
        .route("/api/generate", post(generate))
        .layer(cors)
        .with_state(state)
}

#[derive(Serialize)]
struct HealthResponse {
    healthy: bool,
    version: String,
    uptime_seconds: u64,
    model: String,
}

async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        healthy: true,
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
        model: state.model.clone(),
    })
}

/// Loose wire body; converted into the typed [`ProxyRequest`] with
/// validation so unknown actions and missing queries answer 400.
#[derive(Deserialize)]
struct GenerateBody {
    action: String,
    entry: ContentEntry,
    #[serde(rename = "userQuery")]
    user_query: Option<String>,
}

#[derive(Serialize)]
struct GenerateResponse {
    result: ProxyResponse,
}

async fn generate(
    State(state): State<AppState>,
    Json(body): Json<GenerateBody>,
) -> ApiResult<Json<GenerateResponse>> {
    let request = ProxyRequest::from_parts(&body.action, body.entry, body.user_query)?;
    debug!(
        action = %body.action,
        entry = %request.entry().date,
        "proxying generate request"
    );

    let result = state.proxy.handle(request).await.map_err(|e| {
        error!("generate failed: {e}");
        e
    })?;

    Ok(Json(GenerateResponse { result }))
}
