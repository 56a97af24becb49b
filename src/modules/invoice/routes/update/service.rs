use super::types::{request, response};
use crate::{modules::invoice::repository, types::Context};
use std::sync::Arc;

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    repository::update_by_id(
        &ctx.db_conn.pool,
        payload.id,
        repository::UpdateInvoicePayload {
            payment_method: payload.body.payment_method,
            payment_status: payload.body.payment_status,
            payment_due_date: payload.body.payment_due_date.map(|date| date.naive_utc()),
        },
    )
    .await
    .map_err(|_| response::Error::FailedToUpdateInvoice)?
    .ok_or(response::Error::InvoiceNotFound)
    .map(response::Success::InvoiceUpdated)
}
