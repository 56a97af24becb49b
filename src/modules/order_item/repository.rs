use crate::define_find_many;
use crate::utils::{
    database::{timed, Collection},
    money::round_price,
};
use bigdecimal::BigDecimal;
use chrono::{NaiveDateTime, Utc};
use serde::Serialize;
use sqlx::{FromRow, PgExecutor};
use ulid::Ulid;

type Result<T> = std::result::Result<T, Error>;

#[derive(Serialize, FromRow, Clone, Debug)]
pub struct OrderItem {
    pub id: String,
    pub order_id: String,
    pub food_id: String,
    pub quantity: i32,
    pub unit_price: BigDecimal,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// One order item joined with its food, order and table. Every joined
/// column is optional since the referenced rows may be gone.
#[derive(Serialize, FromRow, Clone, Debug, PartialEq)]
pub struct OrderLine {
    pub food_name: Option<String>,
    pub food_image: Option<String>,
    pub price: BigDecimal,
    pub quantity: i32,
    pub table_number: Option<i32>,
    pub table_id: Option<String>,
    pub order_id: String,
}

pub struct CreateOrderItemPayload {
    pub order_id: String,
    pub food_id: String,
    pub quantity: i32,
    pub unit_price: BigDecimal,
}

pub struct UpdateOrderItemPayload {
    pub food_id: Option<String>,
    pub quantity: Option<i32>,
    pub unit_price: Option<BigDecimal>,
}

#[derive(Debug)]
pub enum Error {
    UnexpectedError,
}

pub async fn create<'e, E: PgExecutor<'e>>(
    e: E,
    payload: CreateOrderItemPayload,
) -> Result<OrderItem> {
    timed(
        sqlx::query_as::<_, OrderItem>(
            "
            INSERT INTO order_items (
                id,
                order_id,
                food_id,
                quantity,
                unit_price,
                created_at,
                updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $6)
            RETURNING *
            ",
        )
        .bind(Ulid::new().to_string())
        .bind(payload.order_id)
        .bind(payload.food_id)
        .bind(payload.quantity)
        .bind(round_price(&payload.unit_price))
        .bind(Utc::now().naive_utc())
        .fetch_one(e),
    )
    .await
    .map_err(|err| {
        tracing::error!("Error occurred while creating an order item: {}", err);
        Error::UnexpectedError
    })
}

pub async fn find_by_id<'e, E: PgExecutor<'e>>(e: E, id: String) -> Result<Option<OrderItem>> {
    timed(
        sqlx::query_as::<_, OrderItem>("SELECT * FROM order_items WHERE id = $1")
            .bind(&id)
            .fetch_optional(e),
    )
    .await
    .map_err(|err| {
        tracing::error!(
            "Error occurred while fetching order item with id {}: {}",
            id,
            err
        );
        Error::UnexpectedError
    })
}

/// Lines of an order in insertion order. A missing food falls back to the
/// unit price recorded on the item.
pub async fn find_lines_by_order_id<'e, E: PgExecutor<'e>>(
    e: E,
    order_id: String,
) -> Result<Vec<OrderLine>> {
    timed(
        sqlx::query_as::<_, OrderLine>(
            "
            SELECT
                foods.name AS food_name,
                foods.food_image AS food_image,
                COALESCE(foods.price, order_items.unit_price) AS price,
                order_items.quantity AS quantity,
                tables.table_number AS table_number,
                tables.id AS table_id,
                order_items.order_id AS order_id
            FROM
                order_items
                LEFT JOIN foods ON foods.id = order_items.food_id
                LEFT JOIN orders ON orders.id = order_items.order_id
                LEFT JOIN tables ON tables.id = orders.table_id
            WHERE
                order_items.order_id = $1
            ORDER BY
                order_items.created_at,
                order_items.id
            ",
        )
        .bind(&order_id)
        .fetch_all(e),
    )
    .await
    .map_err(|err| {
        tracing::error!(
            "Error occurred while fetching lines of order {}: {}",
            order_id,
            err
        );
        Error::UnexpectedError
    })
}

pub async fn update_by_id<'e, E: PgExecutor<'e>>(
    e: E,
    id: String,
    payload: UpdateOrderItemPayload,
) -> Result<Option<OrderItem>> {
    timed(
        sqlx::query_as::<_, OrderItem>(
            "
            UPDATE order_items SET
                food_id = COALESCE($1, food_id),
                quantity = COALESCE($2, quantity),
                unit_price = COALESCE($3, unit_price),
                updated_at = $4
            WHERE
                id = $5
            RETURNING *
            ",
        )
        .bind(payload.food_id)
        .bind(payload.quantity)
        .bind(payload.unit_price.as_ref().map(round_price))
        .bind(Utc::now().naive_utc())
        .bind(&id)
        .fetch_optional(e),
    )
    .await
    .map_err(|err| {
        tracing::error!(
            "Error occurred while updating order item with id {}: {}",
            id,
            err
        );
        Error::UnexpectedError
    })
}

define_find_many!(OrderItem, Collection::OrderItems);
