use super::types::{request, response};
use crate::{
    modules::{invoice::repository, order},
    types::Context,
};
use std::sync::Arc;
use validator::Validate;

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    payload
        .validate()
        .map_err(response::Error::FailedToValidate)?;

    order::repository::find_by_id(&ctx.db_conn.pool, payload.order_id.clone())
        .await
        .map_err(|_| response::Error::FailedToCreateInvoice)?
        .ok_or(response::Error::OrderNotFound)?;

    repository::create(
        &ctx.db_conn.pool,
        repository::CreateInvoicePayload {
            order_id: payload.order_id,
            payment_method: payload.payment_method,
            payment_status: payload.payment_status,
            payment_due_date: payload.payment_due_date.map(|date| date.naive_utc()),
        },
    )
    .await
    .map_err(|_| response::Error::FailedToCreateInvoice)
    .map(response::Success::InvoiceCreated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::invoice::repository::PaymentMethod;
    use serde_json::json;

    #[test]
    fn payment_fields_are_optional() {
        let payload: request::Payload =
            serde_json::from_value(json!({ "order_id": "order-1" })).unwrap();

        assert!(payload.payment_method.is_none());
        assert!(payload.payment_status.is_none());
        assert!(payload.payment_due_date.is_none());
    }

    #[test]
    fn only_known_payment_methods_are_accepted() {
        let payload: request::Payload = serde_json::from_value(json!({
            "order_id": "order-1",
            "payment_method": "CASH",
        }))
        .unwrap();
        assert_eq!(payload.payment_method, Some(PaymentMethod::Cash));

        assert!(serde_json::from_value::<request::Payload>(json!({
            "order_id": "order-1",
            "payment_method": "CHEQUE",
        }))
        .is_err());
    }
}
