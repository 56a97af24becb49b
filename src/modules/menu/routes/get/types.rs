pub mod request {
    pub struct Payload {
        pub id: String,
    }
}

pub mod response {
    use crate::modules::menu::repository::Menu;
    use axum::{extract::Json, http::StatusCode, response::IntoResponse};
    use serde_json::json;

    pub enum Success {
        Menu(Menu),
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::Menu(menu) => (StatusCode::OK, Json(json!(menu))).into_response(),
            }
        }
    }

    pub enum Error {
        FailedToFetchMenu,
        MenuNotFound,
    }

    impl IntoResponse for Error {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::MenuNotFound => (
                    StatusCode::NOT_FOUND,
                    Json(json!({ "error": "Menu not found" })),
                )
                    .into_response(),
                Self::FailedToFetchMenu => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Failed to fetch menu" })),
                )
                    .into_response(),
            }
        }
    }

    pub type Response = Result<Success, Error>;
}
