use crate::define_find_many;
use crate::utils::database::{timed, Collection};
use chrono::{NaiveDateTime, Utc};
use serde::Serialize;
use sqlx::{FromRow, PgExecutor};
use ulid::Ulid;

type Result<T> = std::result::Result<T, Error>;

#[derive(Serialize, FromRow, Clone, Debug)]
pub struct Order {
    pub id: String,
    pub table_id: String,
    pub order_date: NaiveDateTime,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

pub struct CreateOrderPayload {
    pub table_id: String,
}

pub struct UpdateOrderPayload {
    pub table_id: Option<String>,
    pub order_date: Option<NaiveDateTime>,
}

#[derive(Debug)]
pub enum Error {
    UnexpectedError,
}

pub async fn create<'e, E: PgExecutor<'e>>(e: E, payload: CreateOrderPayload) -> Result<Order> {
    timed(
        sqlx::query_as::<_, Order>(
            "
            INSERT INTO orders (id, table_id, order_date, created_at, updated_at)
            VALUES ($1, $2, $3, $3, $3)
            RETURNING *
            ",
        )
        .bind(Ulid::new().to_string())
        .bind(payload.table_id)
        .bind(Utc::now().naive_utc())
        .fetch_one(e),
    )
    .await
    .map_err(|err| {
        tracing::error!("Error occurred while creating an order: {}", err);
        Error::UnexpectedError
    })
}

pub async fn find_by_id<'e, E: PgExecutor<'e>>(e: E, id: String) -> Result<Option<Order>> {
    timed(
        sqlx::query_as::<_, Order>("SELECT * FROM orders WHERE id = $1")
            .bind(&id)
            .fetch_optional(e),
    )
    .await
    .map_err(|err| {
        tracing::error!("Error occurred while fetching order with id {}: {}", id, err);
        Error::UnexpectedError
    })
}

pub async fn update_by_id<'e, E: PgExecutor<'e>>(
    e: E,
    id: String,
    payload: UpdateOrderPayload,
) -> Result<Option<Order>> {
    timed(
        sqlx::query_as::<_, Order>(
            "
            UPDATE orders SET
                table_id = COALESCE($1, table_id),
                order_date = COALESCE($2, order_date),
                updated_at = $3
            WHERE
                id = $4
            RETURNING *
            ",
        )
        .bind(payload.table_id)
        .bind(payload.order_date)
        .bind(Utc::now().naive_utc())
        .bind(&id)
        .fetch_optional(e),
    )
    .await
    .map_err(|err| {
        tracing::error!("Error occurred while updating order with id {}: {}", id, err);
        Error::UnexpectedError
    })
}

define_find_many!(Order, Collection::Orders);
