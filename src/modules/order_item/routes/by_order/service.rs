use super::types::{request, response};
use crate::{modules::order_item::service, types::Context};
use std::sync::Arc;

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    service::items_by_order(&ctx.db_conn.pool, payload.id)
        .await
        .map_err(|_| response::Error::FailedToFetchOrderItems)
        .map(response::Success::OrderItems)
}
