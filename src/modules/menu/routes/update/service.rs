use super::types::{request, response};
use crate::{
    modules::menu::{repository, service},
    types::Context,
};
use chrono::Utc;
use std::sync::Arc;
use validator::Validate;

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    payload
        .body
        .validate()
        .map_err(response::Error::FailedToValidate)?;

    let start_date = payload.body.start_date.map(|date| date.naive_utc());
    let end_date = payload.body.end_date.map(|date| date.naive_utc());

    service::validate_window(start_date, end_date, Utc::now().naive_utc())
        .map_err(|err| response::Error::FailedToValidate(err.into()))?;

    repository::update_by_id(
        &ctx.db_conn.pool,
        payload.id,
        repository::UpdateMenuPayload {
            name: payload.body.name,
            category: payload.body.category,
            start_date,
            end_date,
        },
    )
    .await
    .map_err(|_| response::Error::FailedToUpdateMenu)?
    .ok_or(response::Error::MenuNotFound)
    .map(response::Success::MenuUpdated)
}
