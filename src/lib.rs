//! Product-catalog backend.
//!
//! Create, list, update, and delete product records with image uploads,
//! backed by a MongoDB document store.
//!
//! # Request flow
//!
//! Router → intake validation (duplicate pre-check, required fields, price
//! ranges, derived total) → store operation → JSON response. Handlers run to
//! completion over async I/O; the store is the only shared resource, and the
//! duplicate pre-check is deliberately not atomic with the write that
//! follows it.
//!
//! # Endpoints
//!
//! | Method | Path | |
//! |---|---|---|
//! | GET | `/` | greeting |
//! | POST | `/addproduct` | create from multipart fields + images |
//! | GET | `/products` | list everything |
//! | PUT | `/product/{id}` | full-field replacement |
//! | DELETE | `/product/{id}` | remove by id |

use std::time::Duration;

use axum::{
    Router,
    http::{Method, header::CONTENT_TYPE},
    routing::{delete, get, post, put},
};

use signal::{
    ctrl_c,
    unix::{SignalKind, signal},
};
use tokio::{net::TcpListener, signal};
use tower_http::cors::CorsLayer;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

pub mod config;
pub mod database;
pub mod error;
pub mod intake;
pub mod product;
pub mod routes;
pub mod state;
pub mod uploads;

use routes::{
    add_product_handler, delete_product_handler, hello_handler, products_handler,
    update_product_handler,
};
use state::AppState;

pub async fn start_server() {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    info!("Initializing state...");
    let state = AppState::new().await;

    info!("Starting server...");

    let cors = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60));

    let app = Router::new()
        .route("/", get(hello_handler))
        .route("/addproduct", post(add_product_handler))
        .route("/products", get(products_handler))
        .route("/product/{id}", put(update_product_handler))
        .route("/product/{id}", delete(delete_product_handler))
        .layer(cors)
        .with_state(state.clone());

    let address = format!("0.0.0.0:{}", state.config.port);
    info!("Binding to {address}");

    let listener = TcpListener::bind(&address).await.unwrap();
    info!("Server running on {address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .unwrap();

    println!("Server shutting down...");
}

async fn shutdown_signal() {
    let ctrl_c = async {
        ctrl_c().await.expect("Failed to install Ctrl+C handler");

        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        signal(SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;

        info!("Received terminate signal, shutting down");
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
