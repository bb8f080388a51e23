//! Dashboard server.
//!
//! Serves the single-page dashboard and exposes JSON endpoints for the two
//! operation flows. Run with:
//!
//! ```bash
//! GRAPHDASH_GRAPH_KEY=test \
//! GRAPHDASH_API_BASE_URL=http://localhost:8081/api \
//! cargo run --bin dashboard_server --features server
//! ```

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};
use tracing::info;

use graphdash::{AnalyticsData, AppConfig, DataClient, DashboardError, HttpDataClient};

#[derive(Clone)]
struct AppState {
    client: Arc<dyn DataClient>,
    config: AppConfig,
}

#[derive(Serialize)]
struct ApiResponse<T> {
    success: bool,
    data: Option<T>,
    error: Option<String>,
}

impl<T> ApiResponse<T> {
    fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    fn err(message: String) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message),
        }
    }
}

#[derive(Deserialize)]
struct RunRequest {
    name: String,
    #[serde(default)]
    parameters: HashMap<String, Value>,
}

#[derive(Serialize)]
struct AppConfigInfo {
    #[serde(rename = "appKey")]
    app_key: String,
    #[serde(rename = "graphKey")]
    graph_key: String,
    environment: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("graphdash=info,tower_http=debug")),
        )
        .init();

    dotenvy::dotenv().ok();

    let config = AppConfig::from_env();
    info!(
        graph_key = %config.graph_key,
        api_base_url = %config.api_base_url,
        environment = %config.environment,
        "starting dashboard server"
    );

    let client = HttpDataClient::new(config.clone())?;
    let state = AppState {
        client: Arc::new(client),
        config,
    };

    let app = create_router(state);

    let port = std::env::var("PORT")
        .unwrap_or_else(|_| "3000".to_string())
        .parse::<u16>()
        .unwrap_or(3000);
    let addr = format!("0.0.0.0:{}", port);
    info!("dashboard listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health_check))
        .route("/api/app-config", get(app_config))
        .route("/api/analytics/run", post(run_analytics))
        .route("/api/actions/run", post(run_action))
        // Static dashboard page; API routes above take precedence.
        .fallback_service(ServeDir::new("static"))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(
                    CorsLayer::new()
                        .allow_origin(Any)
                        .allow_methods(Any)
                        .allow_headers(Any),
                ),
        )
        .with_state(state)
}

async fn health_check() -> Json<ApiResponse<String>> {
    Json(ApiResponse::ok("OK".to_string()))
}

/// Non-secret configuration for the page header and stat cards.
async fn app_config(State(state): State<AppState>) -> Json<AppConfigInfo> {
    Json(AppConfigInfo {
        app_key: state.config.app_key.clone(),
        graph_key: state.config.graph_key.clone(),
        environment: state.config.environment.clone(),
    })
}

async fn run_analytics(
    State(state): State<AppState>,
    Json(req): Json<RunRequest>,
) -> (StatusCode, Json<ApiResponse<AnalyticsData>>) {
    if req.name.trim().is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::err("analytics name is required".to_string())),
        );
    }

    match state
        .client
        .fetch_analytics_data(&req.name, req.parameters)
        .await
    {
        Ok(data) => (StatusCode::OK, Json(ApiResponse::ok(data))),
        Err(err) => error_response(err),
    }
}

async fn run_action(
    State(state): State<AppState>,
    Json(req): Json<RunRequest>,
) -> (StatusCode, Json<ApiResponse<Value>>) {
    if req.name.trim().is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::err("action name is required".to_string())),
        );
    }

    match state
        .client
        .fetch_action_data(&req.name, req.parameters)
        .await
    {
        Ok(result) => (StatusCode::OK, Json(ApiResponse::ok(result))),
        Err(err) => error_response(err),
    }
}

fn error_response<T>(err: DashboardError) -> (StatusCode, Json<ApiResponse<T>>) {
    let status =
        StatusCode::from_u16(err.http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(ApiResponse::err(err.to_string())))
}
