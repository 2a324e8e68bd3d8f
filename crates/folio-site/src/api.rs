//! HTTP API for Folio.

use crate::error::Error;
use crate::models::{Author, Redirect, SearchHit, SiteGlobals};
use crate::node::SiteState;
use crate::routes::{self, Metadata, Outcome, RouteContext, RouteParams};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

type AppState = Arc<SiteState>;

/// Build the API router.
pub fn build_router(state: AppState) -> Router {
    // CORS layer for browser access
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health))
        .route("/ready", get(ready))
        // Site layout
        .route("/api/v1/site", get(get_site))
        // Pages
        .route("/api/v1/pages", get(get_home_page))
        .route("/api/v1/pages/*path", get(get_page))
        .route("/api/v1/meta/pages", get(get_home_page_meta))
        .route("/api/v1/meta/pages/*path", get(get_page_meta))
        // Blog
        .route("/api/v1/blog", get(get_blog_index))
        .route("/api/v1/blog/:slug", get(get_post))
        .route("/api/v1/meta/blog/:slug", get(get_post_meta))
        .route("/api/v1/authors/:id", get(get_author))
        // Search
        .route("/api/v1/search", get(search))
        // Redirects
        .route("/api/v1/redirects", get(list_redirects))
        .route("/api/v1/redirects/resolve", get(resolve_redirect))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// An error rendered as a JSON body with a matching status.
pub struct ApiError(Error);

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        Self(err)
    }
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match &self.0 {
            Error::NotFound(_) => StatusCode::NOT_FOUND,
            Error::InvalidArgument(_) => StatusCode::BAD_REQUEST,
            Error::Store { .. } => StatusCode::BAD_GATEWAY,
            Error::Config(_) | Error::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(json!({ "error": self.0.to_string() }))).into_response()
    }
}

impl<T: Serialize> IntoResponse for Outcome<T> {
    fn into_response(self) -> Response {
        match self {
            Outcome::Found(value) => Json(value).into_response(),
            Outcome::NotFound => {
                (StatusCode::NOT_FOUND, Json(json!({ "error": "Not found" }))).into_response()
            }
        }
    }
}

fn metadata_response(metadata: Option<Metadata>) -> Response {
    match metadata {
        Some(metadata) => Json(metadata).into_response(),
        None => StatusCode::NO_CONTENT.into_response(),
    }
}

// --- Health endpoints ---

async fn health() -> &'static str {
    "OK"
}

async fn ready() -> &'static str {
    "OK"
}

// --- Site endpoints ---

async fn get_site(State(state): State<AppState>) -> Result<Json<SiteGlobals>, ApiError> {
    Ok(Json(state.resolver.resolve_site_globals().await?))
}

// --- Page endpoints ---

async fn get_home_page(State(state): State<AppState>, Query(params): Query<RouteParams>) -> Response {
    let ctx = RouteContext::for_page("/", &params);
    routes::render_page(&state.resolver, &ctx).await.into_response()
}

async fn get_page(
    State(state): State<AppState>,
    Path(path): Path<String>,
    Query(params): Query<RouteParams>,
) -> Response {
    let ctx = RouteContext::for_page(&path, &params);
    routes::render_page(&state.resolver, &ctx).await.into_response()
}

async fn get_home_page_meta(
    State(state): State<AppState>,
    Query(params): Query<RouteParams>,
) -> Response {
    let ctx = RouteContext::for_page("/", &params);
    metadata_response(routes::page_metadata(&state.resolver, &ctx).await)
}

async fn get_page_meta(
    State(state): State<AppState>,
    Path(path): Path<String>,
    Query(params): Query<RouteParams>,
) -> Response {
    let ctx = RouteContext::for_page(&path, &params);
    metadata_response(routes::page_metadata(&state.resolver, &ctx).await)
}

// --- Blog endpoints ---

#[derive(Debug, Deserialize)]
struct BlogParams {
    page: Option<u32>,
}

async fn get_blog_index(State(state): State<AppState>, Query(params): Query<BlogParams>) -> Response {
    routes::render_blog_index(&state.resolver, params.page, state.config.posts_per_page)
        .await
        .into_response()
}

async fn get_post(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Query(params): Query<RouteParams>,
) -> Response {
    let ctx = RouteContext::for_post(&slug, &params);
    routes::render_post(&state.resolver, &ctx).await.into_response()
}

async fn get_post_meta(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Query(params): Query<RouteParams>,
) -> Response {
    let ctx = RouteContext::for_post(&slug, &params);
    metadata_response(routes::post_metadata(&state.resolver, &ctx).await)
}

async fn get_author(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Author>, ApiError> {
    match state.resolver.resolve_author(&id).await? {
        Some(author) => Ok(Json(author)),
        None => Err(Error::NotFound(format!("author {id}")).into()),
    }
}

// --- Search endpoints ---

#[derive(Debug, Deserialize)]
struct SearchParams {
    #[serde(default)]
    search: String,
}

async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<SearchHit>>, ApiError> {
    Ok(Json(state.resolver.search_content(&params.search).await?))
}

// --- Redirect endpoints ---

async fn list_redirects(State(state): State<AppState>) -> Result<Json<Vec<Redirect>>, ApiError> {
    Ok(Json(state.resolver.list_active_redirects().await?))
}

#[derive(Debug, Deserialize)]
struct RedirectParams {
    #[serde(default)]
    path: String,
}

async fn resolve_redirect(
    State(state): State<AppState>,
    Query(params): Query<RedirectParams>,
) -> Result<Json<Redirect>, ApiError> {
    match routes::resolve_redirect(&state.resolver, &params.path).await? {
        Some(redirect) => Ok(Json(redirect)),
        None => Err(Error::NotFound(format!("redirect for {}", params.path)).into()),
    }
}
