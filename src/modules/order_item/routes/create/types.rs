pub mod request {
    use crate::utils::money::validate_price;
    use bigdecimal::BigDecimal;
    use serde::{Deserialize, Serialize};
    use serde_aux::field_attributes::deserialize_number_from_string;
    use validator::Validate;

    #[derive(Deserialize, Serialize, Validate)]
    pub struct Item {
        #[validate(length(min = 1, code = "INVALID_FOOD_ID", message = "Food id is required"))]
        pub food_id: String,
        #[serde(deserialize_with = "deserialize_number_from_string")]
        #[validate(range(
            min = 1,
            code = "INVALID_QUANTITY",
            message = "Quantity must be at least 1"
        ))]
        pub quantity: i32,
        #[validate(custom(function = "validate_price"))]
        pub unit_price: BigDecimal,
    }

    #[derive(Deserialize, Validate)]
    pub struct Payload {
        #[validate(length(min = 1, code = "INVALID_TABLE_ID", message = "Table id is required"))]
        pub table_id: String,
        #[validate(
            length(
                min = 1,
                code = "INVALID_ORDER_ITEMS",
                message = "At least one order item is required"
            ),
            nested
        )]
        pub order_items: Vec<Item>,
    }
}

pub mod response {
    use crate::modules::{order::repository::Order, order_item::repository::OrderItem};
    use axum::{extract::Json, http::StatusCode, response::IntoResponse};
    use serde_json::json;
    use validator::ValidationErrors;

    pub enum Success {
        OrderItemsCreated(Order, Vec<OrderItem>),
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::OrderItemsCreated(order, order_items) => (
                    StatusCode::CREATED,
                    Json(json!({
                        "message": "Order items created!",
                        "order": order,
                        "order_items": order_items,
                    })),
                )
                    .into_response(),
            }
        }
    }

    pub enum Error {
        FailedToValidate(ValidationErrors),
        TableNotFound,
        FoodNotFound(String),
        FailedToCreateOrderItems,
    }

    impl IntoResponse for Error {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::FailedToValidate(errors) => {
                    crate::utils::validation::into_response(errors).into_response()
                }
                Self::TableNotFound => (
                    StatusCode::NOT_FOUND,
                    Json(json!({ "error": "Table not found" })),
                )
                    .into_response(),
                Self::FoodNotFound(food_id) => (
                    StatusCode::NOT_FOUND,
                    Json(json!({ "error": format!("Food {} not found", food_id) })),
                )
                    .into_response(),
                Self::FailedToCreateOrderItems => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Failed to create order items" })),
                )
                    .into_response(),
            }
        }
    }

    pub type Response = Result<Success, Error>;
}
