pub mod request {
    use serde::Deserialize;

    #[derive(Deserialize)]
    pub struct Payload {
        pub refresh_token: String,
    }
}

pub mod response {
    use crate::modules::auth::service::token::TokenPair;
    use axum::{extract::Json, http::StatusCode, response::IntoResponse};
    use serde_json::json;

    pub enum Success {
        Refreshed(TokenPair),
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::Refreshed(tokens) => (
                    StatusCode::OK,
                    Json(json!({
                        "access_token": tokens.access_token,
                        "refresh_token": tokens.refresh_token,
                    })),
                )
                    .into_response(),
            }
        }
    }

    #[derive(Debug)]
    pub enum Error {
        InvalidRefreshToken,
        UnexpectedError,
    }

    impl IntoResponse for Error {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::InvalidRefreshToken => (
                    StatusCode::UNAUTHORIZED,
                    Json(json!({ "error": "Invalid refresh token" })),
                )
                    .into_response(),
                Self::UnexpectedError => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Sorry an error occurred" })),
                )
                    .into_response(),
            }
        }
    }

    pub type Response = Result<Success, Error>;
}
