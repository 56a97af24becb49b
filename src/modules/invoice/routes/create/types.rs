pub mod request {
    use crate::modules::invoice::repository::{PaymentMethod, PaymentStatus};
    use chrono::{DateTime, Utc};
    use serde::Deserialize;
    use validator::Validate;

    #[derive(Deserialize, Validate)]
    pub struct Payload {
        #[validate(length(min = 1, code = "INVALID_ORDER_ID", message = "Order id is required"))]
        pub order_id: String,
        pub payment_method: Option<PaymentMethod>,
        pub payment_status: Option<PaymentStatus>,
        pub payment_due_date: Option<DateTime<Utc>>,
    }
}

pub mod response {
    use crate::modules::invoice::repository::Invoice;
    use axum::{extract::Json, http::StatusCode, response::IntoResponse};
    use serde_json::json;
    use validator::ValidationErrors;

    pub enum Success {
        InvoiceCreated(Invoice),
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::InvoiceCreated(invoice) => (
                    StatusCode::CREATED,
                    Json(json!({ "message": "Invoice created!", "invoice": invoice })),
                )
                    .into_response(),
            }
        }
    }

    pub enum Error {
        FailedToValidate(ValidationErrors),
        OrderNotFound,
        FailedToCreateInvoice,
    }

    impl IntoResponse for Error {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::FailedToValidate(errors) => {
                    crate::utils::validation::into_response(errors).into_response()
                }
                Self::OrderNotFound => (
                    StatusCode::NOT_FOUND,
                    Json(json!({ "error": "Order not found" })),
                )
                    .into_response(),
                Self::FailedToCreateInvoice => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Failed to create invoice" })),
                )
                    .into_response(),
            }
        }
    }

    pub type Response = Result<Success, Error>;
}
