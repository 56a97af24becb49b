pub mod request {
    use bigdecimal::BigDecimal;
    use serde::Deserialize;
    use validator::Validate;

    use crate::utils::money::validate_price;

    #[derive(Deserialize, Validate)]
    pub struct Body {
        #[validate(length(
            min = 2,
            max = 100,
            code = "INVALID_NAME",
            message = "Food name must be between 2 and 100 characters"
        ))]
        pub name: Option<String>,
        #[validate(custom(function = "validate_price"))]
        pub price: Option<BigDecimal>,
        #[validate(url(code = "INVALID_FOOD_IMAGE", message = "Food image must be a URL"))]
        pub food_image: Option<String>,
        pub menu_id: Option<String>,
    }

    pub struct Payload {
        pub id: String,
        pub body: Body,
    }
}

pub mod response {
    use crate::modules::food::repository::Food;
    use axum::{extract::Json, http::StatusCode, response::IntoResponse};
    use serde_json::json;
    use validator::ValidationErrors;

    pub enum Success {
        FoodUpdated(Food),
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::FoodUpdated(food) => (
                    StatusCode::OK,
                    Json(json!({ "message": "Food updated!", "food": food })),
                )
                    .into_response(),
            }
        }
    }

    pub enum Error {
        FailedToValidate(ValidationErrors),
        FoodNotFound,
        MenuNotFound,
        FailedToUpdateFood,
    }

    impl IntoResponse for Error {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::FailedToValidate(errors) => {
                    crate::utils::validation::into_response(errors).into_response()
                }
                Self::FoodNotFound => (
                    StatusCode::NOT_FOUND,
                    Json(json!({ "error": "Food not found" })),
                )
                    .into_response(),
                Self::MenuNotFound => (
                    StatusCode::NOT_FOUND,
                    Json(json!({ "error": "Menu not found" })),
                )
                    .into_response(),
                Self::FailedToUpdateFood => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Failed to update food" })),
                )
                    .into_response(),
            }
        }
    }

    pub type Response = Result<Success, Error>;
}
