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
pub struct Food {
    pub id: String,
    pub name: String,
    pub price: BigDecimal,
    pub food_image: String,
    pub menu_id: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

pub struct CreateFoodPayload {
    pub name: String,
    pub price: BigDecimal,
    pub food_image: String,
    pub menu_id: String,
}

pub struct UpdateFoodPayload {
    pub name: Option<String>,
    pub price: Option<BigDecimal>,
    pub food_image: Option<String>,
    pub menu_id: Option<String>,
}

#[derive(Debug)]
pub enum Error {
    UnexpectedError,
}

pub async fn create<'e, E: PgExecutor<'e>>(e: E, payload: CreateFoodPayload) -> Result<Food> {
    timed(
        sqlx::query_as::<_, Food>(
            "
            INSERT INTO foods (
                id,
                name,
                price,
                food_image,
                menu_id,
                created_at,
                updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $6)
            RETURNING *
            ",
        )
        .bind(Ulid::new().to_string())
        .bind(payload.name)
        .bind(round_price(&payload.price))
        .bind(payload.food_image)
        .bind(payload.menu_id)
        .bind(Utc::now().naive_utc())
        .fetch_one(e),
    )
    .await
    .map_err(|err| {
        tracing::error!("Error occurred while creating a food: {}", err);
        Error::UnexpectedError
    })
}

pub async fn find_by_id<'e, E: PgExecutor<'e>>(e: E, id: String) -> Result<Option<Food>> {
    timed(
        sqlx::query_as::<_, Food>("SELECT * FROM foods WHERE id = $1")
            .bind(&id)
            .fetch_optional(e),
    )
    .await
    .map_err(|err| {
        tracing::error!("Error occurred while fetching food with id {}: {}", id, err);
        Error::UnexpectedError
    })
}

pub async fn update_by_id<'e, E: PgExecutor<'e>>(
    e: E,
    id: String,
    payload: UpdateFoodPayload,
) -> Result<Option<Food>> {
    timed(
        sqlx::query_as::<_, Food>(
            "
            UPDATE foods SET
                name = COALESCE($1, name),
                price = COALESCE($2, price),
                food_image = COALESCE($3, food_image),
                menu_id = COALESCE($4, menu_id),
                updated_at = $5
            WHERE
                id = $6
            RETURNING *
            ",
        )
        .bind(payload.name)
        .bind(payload.price.as_ref().map(round_price))
        .bind(payload.food_image)
        .bind(payload.menu_id)
        .bind(Utc::now().naive_utc())
        .bind(&id)
        .fetch_optional(e),
    )
    .await
    .map_err(|err| {
        tracing::error!("Error occurred while updating food with id {}: {}", id, err);
        Error::UnexpectedError
    })
}

define_find_many!(Food, Collection::Foods);
