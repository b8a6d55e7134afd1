pub mod config;
pub mod error;
pub mod routes;

use axum::Router;
use config::AppSettings;
use db::DBService;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

#[derive(Clone)]
pub struct AppState {
    pub db: DBService,
    pub settings: AppSettings,
}

pub fn app(state: AppState) -> Router {
    Router::new()
        .nest("/api", routes::api_router())
        .nest("/web", routes::web::router())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
