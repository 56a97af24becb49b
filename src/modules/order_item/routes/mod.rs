mod by_order;
mod create;
mod get;
mod list;
mod update;

use crate::types::Context;
use axum::routing::Router;
use std::sync::Arc;

pub fn get_router() -> Router<Arc<Context>> {
    Router::new()
        .merge(list::get_router())
        .merge(create::get_router())
        .merge(get::get_router())
        .merge(update::get_router())
}

/// Routes keyed by the owning order rather than the item.
pub fn get_by_order_router() -> Router<Arc<Context>> {
    by_order::get_router()
}
