pub mod request {
    use crate::utils::pagination::Pagination;

    pub struct Payload {
        pub pagination: Pagination,
    }
}

pub mod response {
    use crate::{modules::invoice::repository::Invoice, utils::pagination::Paginated};
    use axum::{extract::Json, http::StatusCode, response::IntoResponse};
    use serde_json::json;

    pub enum Success {
        Invoices(Paginated<Invoice>),
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::Invoices(invoices) => {
                    (StatusCode::OK, Json(json!(invoices))).into_response()
                }
            }
        }
    }

    pub enum Error {
        FailedToFetchInvoices,
    }

    impl IntoResponse for Error {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::FailedToFetchInvoices => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Error occurred while listing invoices" })),
                )
                    .into_response(),
            }
        }
    }

    pub type Response = Result<Success, Error>;
}
