pub mod request {
    use chrono::{DateTime, Utc};
    use serde::Deserialize;
    use validator::Validate;

    #[derive(Deserialize, Validate)]
    pub struct Payload {
        #[validate(length(min = 1, code = "INVALID_NAME", message = "Menu name is required"))]
        pub name: String,
        #[validate(length(
            min = 1,
            code = "INVALID_CATEGORY",
            message = "Menu category is required"
        ))]
        pub category: String,
        pub start_date: Option<DateTime<Utc>>,
        pub end_date: Option<DateTime<Utc>>,
    }
}

pub mod response {
    use crate::modules::menu::repository::Menu;
    use axum::{extract::Json, http::StatusCode, response::IntoResponse};
    use serde_json::json;
    use validator::ValidationErrors;

    pub enum Success {
        MenuCreated(Menu),
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::MenuCreated(menu) => (
                    StatusCode::CREATED,
                    Json(json!({ "message": "Menu created!", "menu": menu })),
                )
                    .into_response(),
            }
        }
    }

    pub enum Error {
        FailedToValidate(ValidationErrors),
        FailedToCreateMenu,
    }

    impl IntoResponse for Error {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::FailedToValidate(errors) => {
                    crate::utils::validation::into_response(errors).into_response()
                }
                Self::FailedToCreateMenu => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Failed to create menu" })),
                )
                    .into_response(),
            }
        }
    }

    pub type Response = Result<Success, Error>;
}
