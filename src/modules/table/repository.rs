use crate::define_find_many;
use crate::utils::database::{timed, Collection};
use chrono::{NaiveDateTime, Utc};
use serde::Serialize;
use sqlx::{FromRow, PgExecutor};
use ulid::Ulid;

type Result<T> = std::result::Result<T, Error>;

#[derive(Serialize, FromRow, Clone, Debug)]
pub struct Table {
    pub id: String,
    pub number_of_guests: i32,
    pub table_number: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

pub struct CreateTablePayload {
    pub number_of_guests: i32,
    pub table_number: i32,
}

pub struct UpdateTablePayload {
    pub number_of_guests: Option<i32>,
    pub table_number: Option<i32>,
}

#[derive(Debug)]
pub enum Error {
    UnexpectedError,
}

pub async fn create<'e, E: PgExecutor<'e>>(e: E, payload: CreateTablePayload) -> Result<Table> {
    timed(
        sqlx::query_as::<_, Table>(
            "
            INSERT INTO tables (id, number_of_guests, table_number, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $4)
            RETURNING *
            ",
        )
        .bind(Ulid::new().to_string())
        .bind(payload.number_of_guests)
        .bind(payload.table_number)
        .bind(Utc::now().naive_utc())
        .fetch_one(e),
    )
    .await
    .map_err(|err| {
        tracing::error!("Error occurred while creating a table: {}", err);
        Error::UnexpectedError
    })
}

pub async fn find_by_id<'e, E: PgExecutor<'e>>(e: E, id: String) -> Result<Option<Table>> {
    timed(
        sqlx::query_as::<_, Table>("SELECT * FROM tables WHERE id = $1")
            .bind(&id)
            .fetch_optional(e),
    )
    .await
    .map_err(|err| {
        tracing::error!("Error occurred while fetching table with id {}: {}", id, err);
        Error::UnexpectedError
    })
}

/// Applies the supplied fields and returns the updated row, or `None` when no
/// table has the given id.
pub async fn update_by_id<'e, E: PgExecutor<'e>>(
    e: E,
    id: String,
    payload: UpdateTablePayload,
) -> Result<Option<Table>> {
    timed(
        sqlx::query_as::<_, Table>(
            "
            UPDATE tables SET
                number_of_guests = COALESCE($1, number_of_guests),
                table_number = COALESCE($2, table_number),
                updated_at = $3
            WHERE
                id = $4
            RETURNING *
            ",
        )
        .bind(payload.number_of_guests)
        .bind(payload.table_number)
        .bind(Utc::now().naive_utc())
        .bind(&id)
        .fetch_optional(e),
    )
    .await
    .map_err(|err| {
        tracing::error!("Error occurred while updating table with id {}: {}", id, err);
        Error::UnexpectedError
    })
}

define_find_many!(Table, Collection::Tables);
