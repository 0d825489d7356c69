mod calculate;
mod cors;
mod error;
mod health;
mod pack_sizes;
mod state;

use std::sync::Arc;

use axum::{
    middleware,
    response::{IntoResponse, Response},
    routing::{delete, get},
};
use http::StatusCode;
use pack_config::Config;
use pack_sizing::PackSizeRegistry;
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};

use self::{error::ApiError, state::ServerState};

/// Builds the service router around `registry`.
///
/// Routes under the configured API prefix:
///
/// * `GET    {prefix}/pack-sizes`
/// * `POST   {prefix}/pack-sizes`
/// * `PUT    {prefix}/pack-sizes`
/// * `DELETE {prefix}/pack-sizes/:size`
/// * `GET    {prefix}/calculate?quantity=N`
///
/// plus the health endpoint when enabled.
pub fn create(config: &Config, registry: Arc<PackSizeRegistry>) -> axum::Router {
    let prefix = normalize_prefix(&config.api.path);
    let state = ServerState::new(
        registry,
        config.limits.max_order_quantity,
        config.limits.max_pack_size,
    );

    let mut router = axum::Router::new()
        .route(
            &format!("{prefix}/pack-sizes"),
            get(pack_sizes::list).post(pack_sizes::add).put(pack_sizes::update),
        )
        .route(&format!("{prefix}/pack-sizes/:size"), delete(pack_sizes::remove))
        .route(&format!("{prefix}/calculate"), get(calculate::calculate));

    if config.health.enabled {
        let path = match normalize_prefix(&config.health.path) {
            path if path.is_empty() => "/".to_string(),
            path => path,
        };

        router = router.route(&path, get(health::health));
    }

    let cors = match config.cors {
        Some(ref cors_config) => cors::generate(cors_config),
        None => CorsLayer::permissive(),
    };

    router
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(config.limits.request_timeout))
        .layer(middleware::map_response(timeout_body))
        .layer(cors)
}

/// The timeout layer answers with an empty 408; give it the same body as every other error.
async fn timeout_body(response: Response) -> Response {
    if response.status() == StatusCode::REQUEST_TIMEOUT {
        ApiError::Timeout.into_response()
    } else {
        response
    }
}

/// `"api/"` and `"/api"` both become `"/api"`; the root becomes `""`.
fn normalize_prefix(path: &str) -> String {
    let trimmed = path.trim_matches('/');

    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{trimmed}")
    }
}
