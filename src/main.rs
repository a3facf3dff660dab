//src/main.rs

use axum::{
    Router,
    routing::{get, post},
};
use tokio::net::TcpListener;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod common;
mod config;
mod db;
mod docs;
mod handlers;
mod models;
mod services;

use crate::config::AppState;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt().with_target(false).compact().init();

    // If configuration is broken the process should not come up at all.
    let app_state = AppState::new()
        .await
        .expect("failed to initialize application state");

    sqlx::migrate!()
        .run(&app_state.db_pool)
        .await
        .expect("failed to run database migrations");
    tracing::info!("database migrations applied");

    let reference_routes = Router::new()
        .route("/reference", get(handlers::reference::get_reference_data))
        .route("/suppliers", get(handlers::reference::list_suppliers));

    let assignment_routes = Router::new()
        .route("/", post(handlers::assignments::assign_seller))
        .route("/active", get(handlers::assignments::get_active_assignments));

    let stock_routes = Router::new()
        .route("/deliveries", post(handlers::stock::record_delivery))
        .route("/allocations", post(handlers::stock::record_allocation));

    let dashboard_routes = Router::new()
        .route("/metrics", get(handlers::dashboard::get_metrics))
        .route("/upcoming", get(handlers::dashboard::get_upcoming));

    let payment_routes = Router::new()
        .route("/", get(handlers::reports::list_payments))
        .route("/confirm", post(handlers::reports::confirm_payment));

    let audit_routes = Router::new()
        .route(
            "/",
            post(handlers::reports::record_audit).get(handlers::reports::list_audits),
        );

    let event_routes = Router::new()
        .route(
            "/",
            post(handlers::events::schedule_event).get(handlers::events::list_events),
        );

    let app = Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", docs::ApiDoc::openapi()))
        .route("/api/health", get(|| async { "OK" }))
        .nest("/api", reference_routes)
        .nest("/api/assignments", assignment_routes)
        .nest("/api/stock", stock_routes)
        .nest("/api/dashboard", dashboard_routes)
        .nest("/api/payments", payment_routes)
        .nest("/api/audits", audit_routes)
        .nest("/api/events", event_routes)
        .with_state(app_state.clone());

    let listener = TcpListener::bind(&app_state.bind_addr)
        .await
        .expect("failed to bind TCP listener");
    tracing::info!("listening on {}", listener.local_addr().unwrap());
    axum::serve(listener, app)
        .await
        .expect("axum server error");
}
