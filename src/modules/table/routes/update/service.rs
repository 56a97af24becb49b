use super::types::{request, response};
use crate::{modules::table::repository, types::Context};
use std::sync::Arc;
use validator::Validate;

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    payload
        .body
        .validate()
        .map_err(response::Error::FailedToValidate)?;

    repository::update_by_id(
        &ctx.db_conn.pool,
        payload.id,
        repository::UpdateTablePayload {
            number_of_guests: payload.body.number_of_guests,
            table_number: payload.body.table_number,
        },
    )
    .await
    .map_err(|_| response::Error::FailedToUpdateTable)?
    .ok_or(response::Error::TableNotFound)
    .map(response::Success::TableUpdated)
}
