use super::types::{request, response};
use crate::{
    modules::{order::repository, table},
    types::Context,
};
use std::sync::Arc;

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    if let Some(table_id) = payload.body.table_id.clone() {
        table::repository::find_by_id(&ctx.db_conn.pool, table_id)
            .await
            .map_err(|_| response::Error::FailedToUpdateOrder)?
            .ok_or(response::Error::TableNotFound)?;
    }

    repository::update_by_id(
        &ctx.db_conn.pool,
        payload.id,
        repository::UpdateOrderPayload {
            table_id: payload.body.table_id,
            order_date: payload.body.order_date.map(|date| date.naive_utc()),
        },
    )
    .await
    .map_err(|_| response::Error::FailedToUpdateOrder)?
    .ok_or(response::Error::OrderNotFound)
    .map(response::Success::OrderUpdated)
}
