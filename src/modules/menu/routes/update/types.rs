pub mod request {
    use chrono::{DateTime, Utc};
    use serde::Deserialize;
    use validator::Validate;

    #[derive(Deserialize, Validate)]
    pub struct Body {
        #[validate(length(min = 1, code = "INVALID_NAME", message = "Menu name is required"))]
        pub name: Option<String>,
        #[validate(length(
            min = 1,
            code = "INVALID_CATEGORY",
            message = "Menu category is required"
        ))]
        pub category: Option<String>,
        pub start_date: Option<DateTime<Utc>>,
        pub end_date: Option<DateTime<Utc>>,
    }

    pub struct Payload {
        pub id: String,
        pub body: Body,
    }
}

pub mod response {
    use crate::modules::menu::repository::Menu;
    use axum::{extract::Json, http::StatusCode, response::IntoResponse};
    use serde_json::json;
    use validator::ValidationErrors;

    pub enum Success {
        MenuUpdated(Menu),
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::MenuUpdated(menu) => (
                    StatusCode::OK,
                    Json(json!({ "message": "Menu updated!", "menu": menu })),
                )
                    .into_response(),
            }
        }
    }

    pub enum Error {
        FailedToValidate(ValidationErrors),
        MenuNotFound,
        FailedToUpdateMenu,
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
                Self::FailedToUpdateMenu => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Failed to update menu" })),
                )
                    .into_response(),
            }
        }
    }

    pub type Response = Result<Success, Error>;
}
