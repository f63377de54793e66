use crate::service::NewsService;
use crate::types::FeedResponse;
use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub fn router(service: Arc<NewsService>) -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/api/rss-feeds", get(rss_feeds))
        .layer(TraceLayer::new_for_http())
        .with_state(service)
}

async fn rss_feeds(State(service): State<Arc<NewsService>>) -> (StatusCode, Json<FeedResponse>) {
    let response = service.get_articles().await;
    let status = if response.is_error() {
        StatusCode::INTERNAL_SERVER_ERROR
    } else {
        StatusCode::OK
    };
    (status, Json(response))
}
