pub mod request {
    use bigdecimal::BigDecimal;
    use serde::Deserialize;
    use validator::Validate;

    use crate::utils::money::validate_price;

    #[derive(Deserialize, Validate)]
    pub struct Payload {
        #[validate(length(
            min = 2,
            max = 100,
            code = "INVALID_NAME",
            message = "Food name must be between 2 and 100 characters"
        ))]
        pub name: String,
        #[validate(custom(function = "validate_price"))]
        pub price: BigDecimal,
        #[validate(url(code = "INVALID_FOOD_IMAGE", message = "Food image must be a URL"))]
        pub food_image: String,
        pub menu_id: String,
    }
}

pub mod response {
    use crate::modules::food::repository::Food;
    use axum::{extract::Json, http::StatusCode, response::IntoResponse};
    use serde_json::json;
    use validator::ValidationErrors;

    pub enum Success {
        FoodCreated(Food),
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::FoodCreated(food) => (
                    StatusCode::CREATED,
                    Json(json!({ "message": "Food created!", "food": food })),
                )
                    .into_response(),
            }
        }
    }

    pub enum Error {
        FailedToValidate(ValidationErrors),
        MenuNotFound,
        FailedToCreateFood,
    }

    impl IntoResponse for Error {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::FailedToValidate(errors) => {
                    crate::utils::validation::into_response(errors).into_response()
                }
                Self::MenuNotFound => (
                    StatusCode::NOT_FOUND,
                    Json(json!({ "error": "Menu not found" })),
                )
                    .into_response(),
                Self::FailedToCreateFood => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Failed to create food" })),
                )
                    .into_response(),
            }
        }
    }

    pub type Response = Result<Success, Error>;
}
