pub mod request {
    use crate::utils::money::validate_price;
    use bigdecimal::BigDecimal;
    use serde::Deserialize;
    use serde_aux::field_attributes::deserialize_option_number_from_string;
    use validator::Validate;

    #[derive(Deserialize, Validate)]
    pub struct Body {
        pub food_id: Option<String>,
        #[serde(default, deserialize_with = "deserialize_option_number_from_string")]
        #[validate(range(
            min = 1,
            code = "INVALID_QUANTITY",
            message = "Quantity must be at least 1"
        ))]
        pub quantity: Option<i32>,
        #[validate(custom(function = "validate_price"))]
        pub unit_price: Option<BigDecimal>,
    }

    pub struct Payload {
        pub id: String,
        pub body: Body,
    }
}

pub mod response {
    use crate::modules::order_item::repository::OrderItem;
    use axum::{extract::Json, http::StatusCode, response::IntoResponse};
    use serde_json::json;
    use validator::ValidationErrors;

    pub enum Success {
        OrderItemUpdated(OrderItem),
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::OrderItemUpdated(order_item) => (
                    StatusCode::OK,
                    Json(json!({ "message": "Order item updated!", "order_item": order_item })),
                )
                    .into_response(),
            }
        }
    }

    pub enum Error {
        FailedToValidate(ValidationErrors),
        OrderItemNotFound,
        FoodNotFound,
        FailedToUpdateOrderItem,
    }

    impl IntoResponse for Error {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::FailedToValidate(errors) => {
                    crate::utils::validation::into_response(errors).into_response()
                }
                Self::OrderItemNotFound => (
                    StatusCode::NOT_FOUND,
                    Json(json!({ "error": "Order item not found" })),
                )
                    .into_response(),
                Self::FoodNotFound => (
                    StatusCode::NOT_FOUND,
                    Json(json!({ "error": "Food not found" })),
                )
                    .into_response(),
                Self::FailedToUpdateOrderItem => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Order item update failed" })),
                )
                    .into_response(),
            }
        }
    }

    pub type Response = Result<Success, Error>;
}
