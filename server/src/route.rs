mod book;

pub use self::book::*;

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handler::{AppModule, BookDatabase};

pub fn app<D: BookDatabase>(module: AppModule<D>) -> Router {
    Router::new()
        .nest("/api/v1", Router::<AppModule<D>>::new().route_book())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::new())
        .with_state(module)
}
