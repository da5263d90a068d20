pub mod apidoc;
pub mod config;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

use axum::{Router, routing::post};
use config::Config;
use tower_http::{
    cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(Clone)]
pub struct AppState {
    pub cfg: Config,
    pub http: reqwest::Client,
}

/// Any origin, method and header, with credentials. Mirrors the request since `*` can't carry credentials.
fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::mirror_request())
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/chat", post(routes::chat::chat))
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", apidoc::ApiDoc::openapi()))
        .with_state(state)
        .layer(cors_layer())
        .layer(TraceLayer::new_for_http())
}
