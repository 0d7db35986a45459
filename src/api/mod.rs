//! Token-proxy HTTP server.
//!
//! Relays a stored bearer token from an upstream key-value store. The
//! upstream body is passed through untouched and unvalidated; an upstream
//! failure surfaces as a bare 500, matching the deployment this replaces.

use std::net::SocketAddr;

use axum::Router;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use serde::Serialize;
use tower_http::cors::{Any, CorsLayer};

use crate::config::ApiConfig;
use crate::error::Error;

#[derive(Clone)]
struct AppState {
    http: reqwest::Client,
    kv_url: String,
    kv_token: String,
}

#[derive(Serialize)]
struct HealthResponse {
    status: String,
}

#[derive(Serialize)]
struct TokenResponse {
    token: String,
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

async fn api_health() -> impl IntoResponse {
    axum::Json(HealthResponse {
        status: "ok".to_string(),
    })
}

async fn api_token(State(state): State<AppState>) -> axum::response::Response {
    let upstream = async {
        state
            .http
            .get(&state.kv_url)
            .bearer_auth(&state.kv_token)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .send()
            .await?
            .text()
            .await
    }
    .await;

    match upstream {
        // Whatever the store returned is the token, verbatim.
        Ok(token) => axum::Json(TokenResponse { token }).into_response(),
        Err(e) => {
            log::error!("token upstream fetch failed: {e}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                axum::Json(ErrorResponse {
                    error: "Internal Server Error".to_string(),
                }),
            )
                .into_response()
        }
    }
}

fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/health", get(api_health))
        .route("/api/token", get(api_token))
        .layer(cors)
        .with_state(state)
}

/// Runs the token proxy until the process is stopped.
///
/// The upstream store location comes from the `KV_API_URL` and
/// `KV_API_TOKEN` environment variables.
///
/// # Errors
///
/// Returns an error when `KV_API_URL` is unset, the bind address is
/// invalid, or the server fails to bind or serve.
pub async fn run_standalone(config: &ApiConfig) -> crate::Result<()> {
    let kv_url = std::env::var("KV_API_URL")
        .map_err(|_| Error::Config("KV_API_URL environment variable not set".to_string()))?;
    let kv_token = std::env::var("KV_API_TOKEN").unwrap_or_default();

    let state = AppState {
        http: reqwest::Client::new(),
        kv_url,
        kv_token,
    };

    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .map_err(|e: std::net::AddrParseError| Error::Config(e.to_string()))?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    log::info!("token proxy listening on {addr}");

    axum::serve(listener, router(state)).await?;
    Ok(())
}
