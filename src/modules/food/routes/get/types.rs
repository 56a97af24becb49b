pub mod request {
    pub struct Payload {
        pub id: String,
    }
}

pub mod response {
    use crate::modules::food::repository::Food;
    use axum::{extract::Json, http::StatusCode, response::IntoResponse};
    use serde_json::json;

    pub enum Success {
        Food(Food),
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::Food(food) => (StatusCode::OK, Json(json!(food))).into_response(),
            }
        }
    }

    pub enum Error {
        FailedToFetchFood,
        FoodNotFound,
    }

    impl IntoResponse for Error {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::FoodNotFound => (
                    StatusCode::NOT_FOUND,
                    Json(json!({ "error": "Food not found" })),
                )
                    .into_response(),
                Self::FailedToFetchFood => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Failed to fetch food" })),
                )
                    .into_response(),
            }
        }
    }

    pub type Response = Result<Success, Error>;
}
