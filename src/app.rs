use crate::handlers;
use crate::state::AppState;
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

pub fn router(state: AppState) -> Router {
    let upload_limit = state.settings.upload_limit_bytes;
    Router::new()
        .route("/", get(handlers::index))
        .route("/reports", post(handlers::create_report_form))
        .route("/reports/:id", get(handlers::show_report))
        .route("/reports/:id/pdf", get(handlers::report_pdf))
        .route("/api/columns", get(handlers::columns))
        .route("/api/reports", post(handlers::create_report))
        .route(
            "/api/reports/:id",
            get(handlers::report_status).delete(handlers::delete_report),
        )
        .route("/api/reports/:id/callback", post(handlers::report_callback))
        .layer(DefaultBodyLimit::max(upload_limit))
        .with_state(state)
}
