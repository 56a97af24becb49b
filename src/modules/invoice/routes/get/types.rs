pub mod request {
    pub struct Payload {
        pub id: String,
    }
}

pub mod response {
    use crate::modules::invoice::service::InvoiceView;
    use axum::{extract::Json, http::StatusCode, response::IntoResponse};
    use serde_json::json;

    pub enum Success {
        Invoice(InvoiceView),
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::Invoice(view) => (StatusCode::OK, Json(json!(view))).into_response(),
            }
        }
    }

    pub enum Error {
        FailedToFetchInvoice,
        InvoiceNotFound,
    }

    impl IntoResponse for Error {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::InvoiceNotFound => (
                    StatusCode::NOT_FOUND,
                    Json(json!({ "error": "Invoice not found" })),
                )
                    .into_response(),
                Self::FailedToFetchInvoice => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Error occurred while listing invoice item" })),
                )
                    .into_response(),
            }
        }
    }

    pub type Response = Result<Success, Error>;
}
