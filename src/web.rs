//! HTTP surface: `GET /?user=<name>` returns the SVG card, `GET /health` is a
//! liveness probe.

use anyhow::{Context, Result};
use axum::{
    Router,
    extract::{Query, State},
    http::{
        HeaderMap, StatusCode, Uri,
        header::{ACCESS_CONTROL_ALLOW_ORIGIN, CACHE_CONTROL, CONTENT_TYPE, HOST},
    },
    response::{IntoResponse, Response},
    routing::get,
};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use thiserror::Error;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use crate::errors::UpstreamError;
use crate::service::{Origin, ProfileStatsService};
use crate::svg::{self, Theme};

pub const MISSING_USER_MESSAGE: &str = "Please provide a GitHub username: ?user=username";
pub const UPSTREAM_FAILURE_MESSAGE: &str = "Error fetching GitHub data";

/// Errors a request can end in. Bodies are plain text and never carry the cause.
#[derive(Error, Debug)]
pub enum WebError {
    #[error("missing `user` query parameter")]
    MissingUser,

    #[error(transparent)]
    Upstream(#[from] UpstreamError),
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        match self {
            WebError::MissingUser => (StatusCode::BAD_REQUEST, MISSING_USER_MESSAGE).into_response(),
            WebError::Upstream(e) => {
                error!("Error: {e}");
                (StatusCode::INTERNAL_SERVER_ERROR, UPSTREAM_FAILURE_MESSAGE).into_response()
            }
        }
    }
}

pub fn router(service: Arc<ProfileStatsService>) -> Router {
    Router::new()
        .route("/", get(profile_card))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .with_state(service)
}

fn request_host<'a>(headers: &'a HeaderMap, uri: &'a Uri) -> Option<&'a str> {
    headers
        .get(HOST)
        .and_then(|v| v.to_str().ok())
        .or_else(|| uri.authority().map(|a| a.as_str()))
}

async fn profile_card(
    State(service): State<Arc<ProfileStatsService>>,
    headers: HeaderMap,
    uri: Uri,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Response, WebError> {
    let username = params
        .get("user")
        .map(String::as_str)
        .filter(|u| !u.is_empty())
        .ok_or(WebError::MissingUser)?;
    let theme = params
        .get("theme")
        .and_then(|t| Theme::parse(t))
        .unwrap_or_default();

    let origin = Origin::from_host(request_host(&headers, &uri));
    let stats = service.stats_for(username, origin).await?;
    let body = svg::render_themed(&stats, username, theme);

    Ok((
        [
            (CONTENT_TYPE, "image/svg+xml"),
            (CACHE_CONTROL, "public, max-age=3600"),
            (ACCESS_CONTROL_ALLOW_ORIGIN, "*"),
        ],
        body,
    )
        .into_response())
}

async fn health() -> &'static str {
    "ok"
}

/// Binds and serves until Ctrl-C.
pub async fn serve(app: Router, addr: SocketAddr) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("Shutting down");
        })
        .await
        .context("Server error")
}
