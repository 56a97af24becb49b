mod login;
mod refresh;
mod sign_up;

use crate::types::Context;
use axum::routing::Router;
use std::sync::Arc;

pub fn get_router() -> Router<Arc<Context>> {
    Router::new()
        .merge(sign_up::get_router())
        .merge(login::get_router())
        .merge(refresh::get_router())
}
