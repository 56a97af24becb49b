use super::types::{request, response};
use crate::{
    modules::{food, order, order_item::repository, table},
    types::Context,
    utils::database::timed,
};
use itertools::Itertools;
use std::sync::Arc;
use validator::Validate;

/// Opens an order on the table and files every item under it, all or nothing.
pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    payload
        .validate()
        .map_err(response::Error::FailedToValidate)?;

    table::repository::find_by_id(&ctx.db_conn.pool, payload.table_id.clone())
        .await
        .map_err(|_| response::Error::FailedToCreateOrderItems)?
        .ok_or(response::Error::TableNotFound)?;

    let food_ids = payload
        .order_items
        .iter()
        .map(|item| item.food_id.clone())
        .unique()
        .collect::<Vec<_>>();

    for food_id in food_ids {
        food::repository::find_by_id(&ctx.db_conn.pool, food_id.clone())
            .await
            .map_err(|_| response::Error::FailedToCreateOrderItems)?
            .ok_or(response::Error::FoodNotFound(food_id))?;
    }

    let mut tx = timed(ctx.db_conn.pool.begin()).await.map_err(|err| {
        tracing::error!("Failed to start database transaction: {}", err);
        response::Error::FailedToCreateOrderItems
    })?;

    let order = order::repository::create(
        &mut *tx,
        order::repository::CreateOrderPayload {
            table_id: payload.table_id,
        },
    )
    .await
    .map_err(|_| response::Error::FailedToCreateOrderItems)?;

    let mut order_items = Vec::with_capacity(payload.order_items.len());
    for item in payload.order_items {
        let order_item = repository::create(
            &mut *tx,
            repository::CreateOrderItemPayload {
                order_id: order.id.clone(),
                food_id: item.food_id,
                quantity: item.quantity,
                unit_price: item.unit_price,
            },
        )
        .await
        .map_err(|_| response::Error::FailedToCreateOrderItems)?;

        order_items.push(order_item);
    }

    timed(tx.commit()).await.map_err(|err| {
        tracing::error!("Failed to commit database transaction: {}", err);
        response::Error::FailedToCreateOrderItems
    })?;

    tracing::info!(
        "Created order {} with {} item(s)",
        order.id,
        order_items.len()
    );

    Ok(response::Success::OrderItemsCreated(order, order_items))
}

#[cfg(test)]
mod tests {
    use super::*;
    use bigdecimal::BigDecimal;
    use serde_json::json;
    use std::str::FromStr;

    #[test]
    fn quantities_may_arrive_as_strings() {
        let payload: request::Payload = serde_json::from_value(json!({
            "table_id": "table-7",
            "order_items": [
                { "food_id": "suya", "quantity": "2", "unit_price": "5.00" },
                { "food_id": "zobo", "quantity": 1, "unit_price": 3.5 },
            ],
        }))
        .unwrap();

        assert!(payload.validate().is_ok());
        assert_eq!(payload.order_items[0].quantity, 2);
        assert_eq!(payload.order_items[1].quantity, 1);
        assert_eq!(
            payload.order_items[1].unit_price,
            BigDecimal::from_str("3.5").unwrap()
        );
    }

    #[test]
    fn rejects_non_numeric_quantities() {
        let parsed = serde_json::from_value::<request::Payload>(json!({
            "table_id": "table-7",
            "order_items": [{ "food_id": "suya", "quantity": "two", "unit_price": "5.00" }],
        }));

        assert!(parsed.is_err());
    }

    #[test]
    fn rejects_empty_orders_and_invalid_items() {
        let empty: request::Payload = serde_json::from_value(json!({
            "table_id": "table-7",
            "order_items": [],
        }))
        .unwrap();
        let errors = empty.validate().unwrap_err();
        let field_errors = errors.field_errors();
        assert_eq!(field_errors["order_items"][0].code, "INVALID_ORDER_ITEMS");

        let invalid: request::Payload = serde_json::from_value(json!({
            "table_id": "table-7",
            "order_items": [{ "food_id": "suya", "quantity": 0, "unit_price": "5.00" }],
        }))
        .unwrap();
        assert!(invalid.validate().is_err());
    }
}
