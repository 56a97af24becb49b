pub mod request {
    pub struct Payload {
        pub id: String,
    }
}

pub mod response {
    use crate::modules::order_item::repository::OrderItem;
    use axum::{extract::Json, http::StatusCode, response::IntoResponse};
    use serde_json::json;

    pub enum Success {
        OrderItem(OrderItem),
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::OrderItem(order_item) => {
                    (StatusCode::OK, Json(json!(order_item))).into_response()
                }
            }
        }
    }

    pub enum Error {
        FailedToFetchOrderItem,
        OrderItemNotFound,
    }

    impl IntoResponse for Error {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::OrderItemNotFound => (
                    StatusCode::NOT_FOUND,
                    Json(json!({ "error": "Order item not found" })),
                )
                    .into_response(),
                Self::FailedToFetchOrderItem => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Failed to fetch order item" })),
                )
                    .into_response(),
            }
        }
    }

    pub type Response = Result<Success, Error>;
}
