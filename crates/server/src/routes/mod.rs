pub mod autocomplete;
pub mod harvests;
pub mod ingredients;
pub mod measures;
pub mod plant_classes;
pub mod plots;
pub mod purchases;
pub mod recipes;
pub mod reports;
pub mod vegetations;
pub mod web;
pub mod workers;

use axum::Router;

use crate::AppState;

/// JSON API surface: out-of-range pages are a client error.
pub fn api_router() -> Router<AppState> {
    Router::new()
        .merge(workers::router())
        .merge(measures::router())
        .merge(plots::router())
        .merge(plant_classes::router())
        .merge(vegetations::router())
        .merge(harvests::router())
        .merge(purchases::router())
        .merge(recipes::router())
        .merge(ingredients::router())
        .merge(autocomplete::router())
        .merge(reports::router())
}
