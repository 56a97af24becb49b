pub mod request {
    pub struct Payload {
        pub id: String,
    }
}

pub mod response {
    use crate::modules::order_item::service::OrderSummary;
    use axum::{extract::Json, http::StatusCode, response::IntoResponse};
    use serde_json::json;

    pub enum Success {
        OrderItems(Vec<OrderSummary>),
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::OrderItems(summaries) => {
                    (StatusCode::OK, Json(json!(summaries))).into_response()
                }
            }
        }
    }

    pub enum Error {
        FailedToFetchOrderItems,
    }

    impl IntoResponse for Error {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::FailedToFetchOrderItems => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({
                        "error": "Error occurred while listing the order items by order id"
                    })),
                )
                    .into_response(),
            }
        }
    }

    pub type Response = Result<Success, Error>;
}
