mod error;
mod routes;
mod state;

use std::sync::Arc;

use axum::routing::get;
use axum::Router;
use tower_http::cors::CorsLayer;

use state::AppState;

#[tokio::main]
async fn main() {
    eprintln!("Initializing tracker SDK...");
    let sdk = tcgtracker_sdk::AsyncTrackerSdk::builder()
        .build()
        .await
        .expect("Failed to initialize tracker SDK");
    eprintln!("SDK ready.");

    let state = Arc::new(AppState { sdk });

    let app = Router::new()
        .route(
            "/api/price_change/top-bottom",
            get(routes::movers::top_bottom),
        )
        .route("/api/cards/top-bottom", get(routes::movers::top_bottom_cards))
        .route("/api/products/{product_id}", get(routes::products::get_product))
        .route(
            "/api/products/{product_id}/history",
            get(routes::products::get_history),
        )
        .route("/api/db-test", get(routes::health::db_test))
        .layer(CorsLayer::permissive())
        .with_state(state);

    let addr = "0.0.0.0:4000";
    eprintln!("Listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
