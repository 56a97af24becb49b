pub mod request {
    use crate::utils::pagination::Pagination;

    pub struct Payload {
        pub pagination: Pagination,
    }
}

pub mod response {
    use crate::{modules::food::repository::Food, utils::pagination::Paginated};
    use axum::{extract::Json, http::StatusCode, response::IntoResponse};
    use serde_json::json;

    pub enum Success {
        Foods(Paginated<Food>),
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::Foods(foods) => (StatusCode::OK, Json(json!(foods))).into_response(),
            }
        }
    }

    pub enum Error {
        FailedToFetchFoods,
    }

    impl IntoResponse for Error {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::FailedToFetchFoods => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Error occurred while listing foods" })),
                )
                    .into_response(),
            }
        }
    }

    pub type Response = Result<Success, Error>;
}
