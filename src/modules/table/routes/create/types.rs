pub mod request {
    use serde::Deserialize;
    use validator::Validate;

    #[derive(Deserialize, Validate)]
    pub struct Payload {
        #[validate(range(
            min = 1,
            code = "INVALID_NUMBER_OF_GUESTS",
            message = "A table must seat at least one guest"
        ))]
        pub number_of_guests: i32,
        #[validate(range(
            min = 1,
            code = "INVALID_TABLE_NUMBER",
            message = "Table number must be positive"
        ))]
        pub table_number: i32,
    }
}

pub mod response {
    use crate::modules::table::repository::Table;
    use axum::{extract::Json, http::StatusCode, response::IntoResponse};
    use serde_json::json;
    use validator::ValidationErrors;

    pub enum Success {
        TableCreated(Table),
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::TableCreated(table) => (
                    StatusCode::CREATED,
                    Json(json!({ "message": "Table created!", "table": table })),
                )
                    .into_response(),
            }
        }
    }

    pub enum Error {
        FailedToValidate(ValidationErrors),
        FailedToCreateTable,
    }

    impl IntoResponse for Error {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::FailedToValidate(errors) => {
                    crate::utils::validation::into_response(errors).into_response()
                }
                Self::FailedToCreateTable => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Failed to create table" })),
                )
                    .into_response(),
            }
        }
    }

    pub type Response = Result<Success, Error>;
}
