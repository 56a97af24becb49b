pub mod request {
    use crate::utils::pagination::Pagination;

    pub struct Payload {
        pub pagination: Pagination,
    }
}

pub mod response {
    use crate::{modules::menu::repository::Menu, utils::pagination::Paginated};
    use axum::{extract::Json, http::StatusCode, response::IntoResponse};
    use serde_json::json;

    pub enum Success {
        Menus(Paginated<Menu>),
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::Menus(menus) => (StatusCode::OK, Json(json!(menus))).into_response(),
            }
        }
    }

    pub enum Error {
        FailedToFetchMenus,
    }

    impl IntoResponse for Error {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::FailedToFetchMenus => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Error occurred while listing menus" })),
                )
                    .into_response(),
            }
        }
    }

    pub type Response = Result<Success, Error>;
}
