use super::types::{request, response};
use crate::{modules::table::repository, types::Context};
use std::sync::Arc;
use validator::Validate;

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    payload
        .validate()
        .map_err(response::Error::FailedToValidate)?;

    repository::create(
        &ctx.db_conn.pool,
        repository::CreateTablePayload {
            number_of_guests: payload.number_of_guests,
            table_number: payload.table_number,
        },
    )
    .await
    .map_err(|_| response::Error::FailedToCreateTable)
    .map(response::Success::TableCreated)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_tables() {
        let payload = request::Payload {
            number_of_guests: 0,
            table_number: 4,
        };

        let errors = payload.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("number_of_guests"));
        assert!(!errors.field_errors().contains_key("table_number"));
    }
}
