use crate::utils::database::{timed, Collection, QueryError};
use axum::{
    async_trait,
    extract::{FromRequestParts, Query},
    http::{request::Parts, StatusCode},
    response::{IntoResponse, Response},
    Json, RequestPartsExt,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use sqlx::{postgres::PgRow, FromRow, PgPool};

const DEFAULT_PAGE: u32 = 1;
const DEFAULT_PER_PAGE: u32 = 10;
/// Largest slice start the store accepts as an `OFFSET`.
const MAX_START_INDEX: u64 = i64::MAX as u64;

#[derive(Serialize, Debug)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub meta: PaginatedMeta,
}

#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct PaginatedMeta {
    pub total_count: i64,
    pub page: u32,
    pub per_page: u32,
    pub start_index: u64,
}

impl<T> Paginated<T> {
    pub fn new(items: Vec<T>, total_count: i64, pagination: &Pagination) -> Paginated<T> {
        Self {
            items,
            meta: PaginatedMeta {
                total_count,
                page: pagination.page,
                per_page: pagination.per_page,
                start_index: pagination.start_index(),
            },
        }
    }

    pub fn empty(pagination: &Pagination) -> Paginated<T> {
        Self::new(vec![], 0, pagination)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Pagination {
    pub page: u32,
    pub per_page: u32,
    /// Explicit slice start. Takes precedence over the page-derived index.
    pub start_index: Option<u64>,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            per_page: DEFAULT_PER_PAGE,
            start_index: None,
        }
    }
}

impl Pagination {
    pub fn new(page: u32, per_page: u32) -> Self {
        Self {
            page: page.max(1),
            per_page: per_page.max(1),
            start_index: None,
        }
    }

    pub fn with_start_index(mut self, start_index: u64) -> Self {
        self.start_index = Some(start_index);
        self
    }

    pub fn start_index(&self) -> u64 {
        let page_start = (self.page.saturating_sub(1) as u64).saturating_mul(self.per_page as u64);

        self.start_index.unwrap_or(page_start).min(MAX_START_INDEX)
    }

    /// Half-open index range `[start, end)` of the page within the collection.
    pub fn window(&self) -> std::ops::Range<u64> {
        let start = self.start_index();
        start..start.saturating_add(self.per_page as u64)
    }

    /// `OFFSET` and `LIMIT` of the slice query.
    fn bounds(&self) -> (i64, i64) {
        let window = self.window();
        let offset = i64::try_from(window.start).unwrap_or(i64::MAX);
        let limit = i64::try_from(window.end - window.start).unwrap_or(i64::MAX);
        (offset, limit)
    }
}

/// Raw query parameters. Unparseable values fall back to the defaults rather
/// than rejecting the request.
#[derive(Deserialize, Default)]
struct PaginationQuery {
    page: Option<String>,
    #[serde(alias = "recordPerPage")]
    per_page: Option<String>,
    #[serde(alias = "startIndex")]
    start_index: Option<String>,
}

impl From<PaginationQuery> for Pagination {
    fn from(query: PaginationQuery) -> Self {
        let page = query
            .page
            .and_then(|page| page.parse::<u32>().ok())
            .filter(|page| *page >= 1)
            .unwrap_or(DEFAULT_PAGE);
        let per_page = query
            .per_page
            .and_then(|per_page| per_page.parse::<u32>().ok())
            .filter(|per_page| *per_page >= 1)
            .unwrap_or(DEFAULT_PER_PAGE);
        let start_index = query
            .start_index
            .and_then(|start_index| start_index.parse::<u64>().ok());

        Self {
            page,
            per_page,
            start_index,
        }
    }
}

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for Pagination {
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        match parts.extract::<Query<PaginationQuery>>().await {
            Ok(Query(query)) => Ok(query.into()),
            _ => Err((
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": "Invalid pagination options"})),
            )
                .into_response()),
        }
    }
}

/// Lists one page of a collection.
///
/// Runs the bucket stage (total count over the whole collection) and the slice
/// stage (`[start_index, start_index + per_page)` in insertion order)
/// concurrently. A missing bucket row is an empty collection, not an error.
pub async fn find_page<T>(
    pool: &PgPool,
    collection: Collection,
    pagination: &Pagination,
) -> Result<Paginated<T>, QueryError>
where
    T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
{
    let table = collection.table_name();
    let bucket_query = format!("SELECT COUNT(*) FROM {}", table);
    let slice_query = format!(
        "SELECT * FROM {} ORDER BY created_at, id OFFSET $1 LIMIT $2",
        table
    );
    let (offset, limit) = pagination.bounds();

    let (total_count, items) = tokio::try_join!(
        timed(sqlx::query_scalar::<_, i64>(&bucket_query).fetch_optional(pool)),
        timed(
            sqlx::query_as::<_, T>(&slice_query)
                .bind(offset)
                .bind(limit)
                .fetch_all(pool)
        ),
    )?;

    match total_count {
        Some(total_count) => Ok(Paginated::new(items, total_count, pagination)),
        None => Ok(Paginated::empty(pagination)),
    }
}

#[macro_export]
macro_rules! define_find_many {
    ($entity:ty, $collection:expr) => {
        pub async fn find_many(
            pool: &sqlx::PgPool,
            pagination: $crate::utils::pagination::Pagination,
        ) -> Result<$crate::utils::pagination::Paginated<$entity>> {
            $crate::utils::pagination::find_page::<$entity>(pool, $collection, &pagination)
                .await
                .map_err(|err| {
                    tracing::error!(
                        "Error occurred while listing {}: {}",
                        $collection.table_name(),
                        err
                    );
                    Error::UnexpectedError
                })
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(page: Option<&str>, per_page: Option<&str>, start: Option<&str>) -> Pagination {
        PaginationQuery {
            page: page.map(String::from),
            per_page: per_page.map(String::from),
            start_index: start.map(String::from),
        }
        .into()
    }

    #[test]
    fn second_page_of_ten_covers_indices_ten_to_twenty() {
        let pagination = Pagination::new(2, 10);

        assert_eq!(pagination.start_index(), 10);
        assert_eq!(pagination.window(), 10..20);
    }

    #[test]
    fn explicit_start_index_takes_precedence() {
        let pagination = Pagination::new(2, 10).with_start_index(3);

        assert_eq!(pagination.window(), 3..13);
        assert_eq!(query(Some("2"), Some("10"), Some("5")).window(), 5..15);
    }

    #[test]
    fn invalid_values_fall_back_to_defaults() {
        assert_eq!(query(None, None, None), Pagination::default());
        assert_eq!(query(Some("0"), Some("-3"), None), Pagination::default());
        assert_eq!(query(Some("abc"), Some("x"), Some("y")), Pagination::default());
        assert_eq!(query(Some("3"), None, None).window(), 20..30);
    }

    #[test]
    fn oversized_start_index_is_capped_at_the_largest_offset() {
        let pagination = query(None, Some("10"), Some("18446744073709551615"));

        assert_eq!(pagination.start_index(), i64::MAX as u64);
        assert_eq!(pagination.window().end - pagination.window().start, 10);
        assert_eq!(pagination.bounds(), (i64::MAX, 10));
    }

    #[test]
    fn start_index_just_past_the_largest_offset_stays_non_negative() {
        let pagination = query(None, None, Some("9223372036854775808"));

        let (offset, limit) = pagination.bounds();
        assert_eq!(offset, i64::MAX);
        assert_eq!(limit, DEFAULT_PER_PAGE as i64);

        let pagination = query(None, None, Some("9223372036854775807"));
        assert_eq!(pagination.bounds(), (i64::MAX, DEFAULT_PER_PAGE as i64));
    }

    #[test]
    fn huge_page_numbers_do_not_overflow() {
        let pagination = Pagination::new(u32::MAX, u32::MAX);

        assert_eq!(pagination.start_index(), i64::MAX as u64);
        assert_eq!(pagination.bounds(), (i64::MAX, u32::MAX as i64));

        let pagination = Pagination::new(1_000_000, 1_000);
        assert_eq!(pagination.bounds(), (999_999_000, 1_000));
    }

    #[test]
    fn empty_page_reports_zero_total() {
        let pagination = Pagination::new(4, 25);
        let page: Paginated<String> = Paginated::empty(&pagination);

        assert!(page.items.is_empty());
        assert_eq!(
            page.meta,
            PaginatedMeta {
                total_count: 0,
                page: 4,
                per_page: 25,
                start_index: 75,
            }
        );
    }
}
