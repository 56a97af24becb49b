use crate::define_find_many;
use crate::utils::database::{timed, Collection};
use chrono::{Duration, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{postgres::PgRow, FromRow, PgExecutor, Row};
use std::str::FromStr;
use ulid::Ulid;

type Result<T> = std::result::Result<T, Error>;

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub enum PaymentMethod {
    #[serde(rename = "CARD")]
    Card,
    #[serde(rename = "CASH")]
    Cash,
}

impl ToString for PaymentMethod {
    fn to_string(&self) -> String {
        match self {
            PaymentMethod::Card => String::from("CARD"),
            PaymentMethod::Cash => String::from("CASH"),
        }
    }
}

impl FromStr for PaymentMethod {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "CARD" => Ok(PaymentMethod::Card),
            "CASH" => Ok(PaymentMethod::Cash),
            _ => Err(format!("'{}' is not a valid PaymentMethod", s)),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq)]
pub enum PaymentStatus {
    #[default]
    #[serde(rename = "PENDING")]
    Pending,
    #[serde(rename = "PAID")]
    Paid,
}

impl ToString for PaymentStatus {
    fn to_string(&self) -> String {
        match self {
            PaymentStatus::Pending => String::from("PENDING"),
            PaymentStatus::Paid => String::from("PAID"),
        }
    }
}

impl FromStr for PaymentStatus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "PENDING" => Ok(PaymentStatus::Pending),
            "PAID" => Ok(PaymentStatus::Paid),
            _ => Err(format!("'{}' is not a valid PaymentStatus", s)),
        }
    }
}

#[derive(Serialize, Clone, Debug)]
pub struct Invoice {
    pub id: String,
    pub order_id: String,
    pub payment_method: Option<PaymentMethod>,
    pub payment_status: PaymentStatus,
    pub payment_due_date: NaiveDateTime,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

fn decode_column<T: FromStr<Err = String>>(
    column: &str,
    raw: String,
) -> std::result::Result<T, sqlx::Error> {
    raw.parse().map_err(|err: String| sqlx::Error::ColumnDecode {
        index: column.to_string(),
        source: err.into(),
    })
}

impl<'r> FromRow<'r, PgRow> for Invoice {
    fn from_row(row: &'r PgRow) -> std::result::Result<Self, sqlx::Error> {
        let payment_method = row
            .try_get::<Option<String>, _>("payment_method")?
            .map(|raw| decode_column("payment_method", raw))
            .transpose()?;

        Ok(Self {
            id: row.try_get("id")?,
            order_id: row.try_get("order_id")?,
            payment_method,
            payment_status: decode_column("payment_status", row.try_get("payment_status")?)?,
            payment_due_date: row.try_get("payment_due_date")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}

pub struct CreateInvoicePayload {
    pub order_id: String,
    pub payment_method: Option<PaymentMethod>,
    pub payment_status: Option<PaymentStatus>,
    pub payment_due_date: Option<NaiveDateTime>,
}

pub struct UpdateInvoicePayload {
    pub payment_method: Option<PaymentMethod>,
    pub payment_status: Option<PaymentStatus>,
    pub payment_due_date: Option<NaiveDateTime>,
}

#[derive(Debug)]
pub enum Error {
    UnexpectedError,
}

/// Invoices fall due one day after they are raised unless told otherwise.
pub fn default_due_date(now: NaiveDateTime) -> NaiveDateTime {
    now + Duration::days(1)
}

pub async fn create<'e, E: PgExecutor<'e>>(e: E, payload: CreateInvoicePayload) -> Result<Invoice> {
    let now = Utc::now().naive_utc();

    timed(
        sqlx::query_as::<_, Invoice>(
            "
            INSERT INTO invoices (
                id,
                order_id,
                payment_method,
                payment_status,
                payment_due_date,
                created_at,
                updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $6)
            RETURNING *
            ",
        )
        .bind(Ulid::new().to_string())
        .bind(payload.order_id)
        .bind(payload.payment_method.map(|method| method.to_string()))
        .bind(payload.payment_status.unwrap_or_default().to_string())
        .bind(
            payload
                .payment_due_date
                .unwrap_or_else(|| default_due_date(now)),
        )
        .bind(now)
        .fetch_one(e),
    )
    .await
    .map_err(|err| {
        tracing::error!("Error occurred while creating an invoice: {}", err);
        Error::UnexpectedError
    })
}

pub async fn find_by_id<'e, E: PgExecutor<'e>>(e: E, id: String) -> Result<Option<Invoice>> {
    timed(
        sqlx::query_as::<_, Invoice>("SELECT * FROM invoices WHERE id = $1")
            .bind(&id)
            .fetch_optional(e),
    )
    .await
    .map_err(|err| {
        tracing::error!(
            "Error occurred while fetching invoice with id {}: {}",
            id,
            err
        );
        Error::UnexpectedError
    })
}

pub async fn update_by_id<'e, E: PgExecutor<'e>>(
    e: E,
    id: String,
    payload: UpdateInvoicePayload,
) -> Result<Option<Invoice>> {
    timed(
        sqlx::query_as::<_, Invoice>(
            "
            UPDATE invoices SET
                payment_method = COALESCE($1, payment_method),
                payment_status = COALESCE($2, payment_status),
                payment_due_date = COALESCE($3, payment_due_date),
                updated_at = $4
            WHERE
                id = $5
            RETURNING *
            ",
        )
        .bind(payload.payment_method.map(|method| method.to_string()))
        .bind(payload.payment_status.map(|status| status.to_string()))
        .bind(payload.payment_due_date)
        .bind(Utc::now().naive_utc())
        .bind(&id)
        .fetch_optional(e),
    )
    .await
    .map_err(|err| {
        tracing::error!(
            "Error occurred while updating invoice with id {}: {}",
            id,
            err
        );
        Error::UnexpectedError
    })
}

define_find_many!(Invoice, Collection::Invoices);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payment_enums_use_their_stored_names() {
        assert_eq!("CARD".parse::<PaymentMethod>(), Ok(PaymentMethod::Card));
        assert_eq!(PaymentMethod::Cash.to_string(), "CASH");
        assert_eq!("PAID".parse::<PaymentStatus>(), Ok(PaymentStatus::Paid));
        assert!("paid".parse::<PaymentStatus>().is_err());
        assert_eq!(PaymentStatus::default(), PaymentStatus::Pending);
    }

    #[test]
    fn invoices_fall_due_a_day_later() {
        let now = Utc::now().naive_utc();

        assert_eq!(default_due_date(now) - now, Duration::days(1));
    }
}
