use super::types::{request, response};
use crate::{
    modules::{
        invoice::{repository, service},
        order_item,
    },
    types::Context,
};
use std::sync::Arc;

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    let invoice = repository::find_by_id(&ctx.db_conn.pool, payload.id)
        .await
        .map_err(|_| response::Error::FailedToFetchInvoice)?
        .ok_or(response::Error::InvoiceNotFound)?;

    let summaries =
        order_item::service::items_by_order(&ctx.db_conn.pool, invoice.order_id.clone())
            .await
            .map_err(|_| response::Error::FailedToFetchInvoice)?;

    Ok(response::Success::Invoice(service::assemble_view(
        invoice, summaries,
    )))
}
