use super::types::{request, response};
use crate::{
    modules::{order::repository, table},
    types::Context,
};
use std::sync::Arc;
use validator::Validate;

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    payload
        .validate()
        .map_err(response::Error::FailedToValidate)?;

    table::repository::find_by_id(&ctx.db_conn.pool, payload.table_id.clone())
        .await
        .map_err(|_| response::Error::FailedToCreateOrder)?
        .ok_or(response::Error::TableNotFound)?;

    repository::create(
        &ctx.db_conn.pool,
        repository::CreateOrderPayload {
            table_id: payload.table_id,
        },
    )
    .await
    .map_err(|_| response::Error::FailedToCreateOrder)
    .map(response::Success::OrderCreated)
}
