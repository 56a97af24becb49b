use super::{auth, food, invoice, menu, order, order_item, table, user};
use crate::types::Context;
use axum::{http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use serde_json::json;
use std::sync::Arc;

async fn health_check() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(json!({ "message": "Welcome to the restaurant API" })),
    )
}

pub fn get_router() -> Router<Arc<Context>> {
    Router::new()
        .route("/", get(health_check))
        .nest(
            "/users",
            user::routes::get_router().merge(auth::routes::get_router()),
        )
        .nest("/tables", table::routes::get_router())
        .nest("/menus", menu::routes::get_router())
        .nest("/foods", food::routes::get_router())
        .nest("/orders", order::routes::get_router())
        .nest("/order-items", order_item::routes::get_router())
        .nest(
            "/order-items-order",
            order_item::routes::get_by_order_router(),
        )
        .nest("/invoices", invoice::routes::get_router())
}
