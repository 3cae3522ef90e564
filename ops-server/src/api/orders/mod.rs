//! Order API 模块

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/orders", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        // Receipt lookup (must be before /{id} to avoid path conflicts)
        .route("/receipt/{receipt}", get(handler::get_by_receipt))
        .route("/{id}", get(handler::get_by_id))
        .route("/{id}/settle", post(handler::settle))
        .route("/{id}/void", post(handler::void))
        .route(
            "/{id}/payments/{index}/cancel",
            post(handler::cancel_payment),
        )
}
