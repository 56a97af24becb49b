use super::types::{request, response};
use crate::{
    modules::{food::repository, menu},
    types::Context,
};
use std::sync::Arc;
use validator::Validate;

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    payload
        .body
        .validate()
        .map_err(response::Error::FailedToValidate)?;

    if let Some(menu_id) = payload.body.menu_id.clone() {
        menu::repository::find_by_id(&ctx.db_conn.pool, menu_id)
            .await
            .map_err(|_| response::Error::FailedToUpdateFood)?
            .ok_or(response::Error::MenuNotFound)?;
    }

    repository::update_by_id(
        &ctx.db_conn.pool,
        payload.id,
        repository::UpdateFoodPayload {
            name: payload.body.name,
            price: payload.body.price,
            food_image: payload.body.food_image,
            menu_id: payload.body.menu_id,
        },
    )
    .await
    .map_err(|_| response::Error::FailedToUpdateFood)?
    .ok_or(response::Error::FoodNotFound)
    .map(response::Success::FoodUpdated)
}
