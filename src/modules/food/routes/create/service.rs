use super::types::{request, response};
use crate::{
    modules::{food::repository, menu},
    types::Context,
};
use std::sync::Arc;
use validator::Validate;

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    payload
        .validate()
        .map_err(response::Error::FailedToValidate)?;

    menu::repository::find_by_id(&ctx.db_conn.pool, payload.menu_id.clone())
        .await
        .map_err(|_| response::Error::FailedToCreateFood)?
        .ok_or(response::Error::MenuNotFound)?;

    repository::create(
        &ctx.db_conn.pool,
        repository::CreateFoodPayload {
            name: payload.name,
            price: payload.price,
            food_image: payload.food_image,
            menu_id: payload.menu_id,
        },
    )
    .await
    .map_err(|_| response::Error::FailedToCreateFood)
    .map(response::Success::FoodCreated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn accepts_prices_as_numbers_or_strings() {
        let payload: request::Payload = serde_json::from_value(json!({
            "name": "Jollof rice",
            "price": "12.5",
            "food_image": "https://cdn.example.com/jollof.png",
            "menu_id": "01HZZZZZZZZZZZZZZZZZZZZZZZ",
        }))
        .unwrap();
        assert!(payload.validate().is_ok());

        let payload: request::Payload = serde_json::from_value(json!({
            "name": "Jollof rice",
            "price": 12.5,
            "food_image": "https://cdn.example.com/jollof.png",
            "menu_id": "01HZZZZZZZZZZZZZZZZZZZZZZZ",
        }))
        .unwrap();
        assert!(payload.validate().is_ok());
    }

    #[test]
    fn rejects_free_food_and_bad_images() {
        let payload: request::Payload = serde_json::from_value(json!({
            "name": "J",
            "price": "0",
            "food_image": "jollof.png",
            "menu_id": "01HZZZZZZZZZZZZZZZZZZZZZZZ",
        }))
        .unwrap();

        let errors = payload.validate().unwrap_err();
        let fields = errors.field_errors();
        for field in ["name", "price", "food_image"] {
            assert!(fields.contains_key(field), "{} should be invalid", field);
        }
    }
}
