pub mod request {
    use regex::Regex;
    use serde::Deserialize;
    use std::borrow::Cow;
    use validator::{Validate, ValidationError};

    fn validate_phone(phone: &str) -> Result<(), ValidationError> {
        let regex = Regex::new(r"^\+?[0-9]{7,15}$").expect("Invalid phone number regex");
        match regex.is_match(phone) {
            true => Ok(()),
            false => Err(ValidationError::new("INVALID_PHONE").with_message(Cow::from(
                "Phone number must contain 7 to 15 digits, optionally prefixed with +",
            ))),
        }
    }

    #[derive(Deserialize, Validate)]
    pub struct Payload {
        #[validate(length(
            min = 2,
            max = 100,
            code = "INVALID_FIRST_NAME",
            message = "First name must be between 2 and 100 characters"
        ))]
        pub first_name: String,
        #[validate(length(
            min = 2,
            max = 100,
            code = "INVALID_LAST_NAME",
            message = "Last name must be between 2 and 100 characters"
        ))]
        pub last_name: String,
        #[validate(email(code = "INVALID_USER_EMAIL", message = "Invalid email address"))]
        pub email: String,
        #[validate(custom(code = "INVALID_PHONE", function = "validate_phone"))]
        pub phone: String,
        #[validate(length(
            min = 6,
            code = "INVALID_PASSWORD",
            message = "Password must be at least 6 characters"
        ))]
        pub password: String,
        #[validate(url(code = "INVALID_AVATAR", message = "Avatar must be a URL"))]
        pub avatar: Option<String>,
    }
}

pub mod response {
    use crate::modules::{auth::service::token::TokenPair, user::repository::User};
    use axum::{extract::Json, http::StatusCode, response::IntoResponse};
    use serde_json::json;
    use validator::ValidationErrors;

    pub enum Success {
        SignedUp(User, TokenPair),
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::SignedUp(user, tokens) => (
                    StatusCode::CREATED,
                    Json(json!({
                        "message": "Sign up successful",
                        "user": user,
                        "access_token": tokens.access_token,
                        "refresh_token": tokens.refresh_token,
                    })),
                )
                    .into_response(),
            }
        }
    }

    pub enum Error {
        FailedToValidate(ValidationErrors),
        FailedToFetchUser,
        EmailAlreadyInUse,
        PhoneNumberAlreadyInUse,
        SignupFailed,
        UnexpectedError,
    }

    impl IntoResponse for Error {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::FailedToValidate(errors) => {
                    crate::utils::validation::into_response(errors).into_response()
                }
                Self::FailedToFetchUser => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Failed to fetch user" })),
                )
                    .into_response(),
                Self::EmailAlreadyInUse => (
                    StatusCode::CONFLICT,
                    Json(json!({ "error": "Email already in use" })),
                )
                    .into_response(),
                Self::PhoneNumberAlreadyInUse => (
                    StatusCode::CONFLICT,
                    Json(json!({ "error": "Phone number already in use" })),
                )
                    .into_response(),
                Self::SignupFailed => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Sign up failed!" })),
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
