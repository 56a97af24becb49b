pub mod request {
    use crate::modules::invoice::repository::{PaymentMethod, PaymentStatus};
    use chrono::{DateTime, Utc};
    use serde::Deserialize;

    #[derive(Deserialize)]
    pub struct Body {
        pub payment_method: Option<PaymentMethod>,
        pub payment_status: Option<PaymentStatus>,
        pub payment_due_date: Option<DateTime<Utc>>,
    }

    pub struct Payload {
        pub id: String,
        pub body: Body,
    }
}

pub mod response {
    use crate::modules::invoice::repository::Invoice;
    use axum::{extract::Json, http::StatusCode, response::IntoResponse};
    use serde_json::json;

    pub enum Success {
        InvoiceUpdated(Invoice),
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::InvoiceUpdated(invoice) => (
                    StatusCode::OK,
                    Json(json!({ "message": "Invoice updated!", "invoice": invoice })),
                )
                    .into_response(),
            }
        }
    }

    pub enum Error {
        InvoiceNotFound,
        FailedToUpdateInvoice,
    }

    impl IntoResponse for Error {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::InvoiceNotFound => (
                    StatusCode::NOT_FOUND,
                    Json(json!({ "error": "Invoice not found" })),
                )
                    .into_response(),
                Self::FailedToUpdateInvoice => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Failed to update the invoice" })),
                )
                    .into_response(),
            }
        }
    }

    pub type Response = Result<Success, Error>;
}
