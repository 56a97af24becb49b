use super::types::{request, response};
use crate::{
    modules::{food, order_item::repository},
    types::Context,
};
use std::sync::Arc;
use validator::Validate;

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    payload
        .body
        .validate()
        .map_err(response::Error::FailedToValidate)?;

    if let Some(food_id) = payload.body.food_id.clone() {
        food::repository::find_by_id(&ctx.db_conn.pool, food_id)
            .await
            .map_err(|_| response::Error::FailedToUpdateOrderItem)?
            .ok_or(response::Error::FoodNotFound)?;
    }

    repository::update_by_id(
        &ctx.db_conn.pool,
        payload.id,
        repository::UpdateOrderItemPayload {
            food_id: payload.body.food_id,
            quantity: payload.body.quantity,
            unit_price: payload.body.unit_price,
        },
    )
    .await
    .map_err(|_| response::Error::FailedToUpdateOrderItem)?
    .ok_or(response::Error::OrderItemNotFound)
    .map(response::Success::OrderItemUpdated)
}
