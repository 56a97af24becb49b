use super::types::{request, response};
use crate::{modules::order::repository, types::Context};
use std::sync::Arc;

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    repository::find_many(&ctx.db_conn.pool, payload.pagination)
        .await
        .map_err(|_| response::Error::FailedToFetchOrders)
        .map(response::Success::Orders)
}
