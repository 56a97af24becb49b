use sqlx::{postgres::PgPoolOptions, PgPool};
use std::future::Future;
use std::time::Duration;

/// Upper bound for a single store operation. Elapsed operations are dropped,
/// which cancels the underlying query.
pub const STORE_TIMEOUT: Duration = Duration::from_secs(100);

#[derive(Clone)]
pub struct DatabaseConnection {
    pub pool: PgPool,
}

pub async fn connect(database_url: &str) -> DatabaseConnection {
    DatabaseConnection {
        pool: PgPoolOptions::new()
            .max_connections(4)
            .acquire_timeout(STORE_TIMEOUT)
            .connect(database_url)
            .await
            .unwrap_or_else(|e| {
                tracing::error!("{:}", e);
                panic!("Error connecting to database {}", database_url)
            }),
    }
}

/// Builds a pool without opening a connection until the first query.
pub fn connect_lazy(database_url: &str) -> Result<DatabaseConnection, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(4)
        .acquire_timeout(STORE_TIMEOUT)
        .connect_lazy(database_url)
        .map(|pool| DatabaseConnection { pool })
}

pub async fn migrate(db_conn: DatabaseConnection) {
    match sqlx::migrate!().run(&db_conn.pool).await {
        Ok(_) => (),
        Err(err) => {
            tracing::error!("{}", err);
            panic!("Failed to run database migrations");
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum QueryError {
    #[error("store operation timed out after {0:?}")]
    Timeout(Duration),
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

impl QueryError {
    /// Name of the unique constraint the query ran into, if that is why it failed.
    pub fn violated_unique_constraint(&self) -> Option<&str> {
        match self {
            Self::Database(sqlx::Error::Database(err)) if err.is_unique_violation() => {
                err.constraint()
            }
            _ => None,
        }
    }
}

pub async fn timed<T, F>(query: F) -> Result<T, QueryError>
where
    F: Future<Output = Result<T, sqlx::Error>>,
{
    timed_with(STORE_TIMEOUT, query).await
}

pub async fn timed_with<T, F>(limit: Duration, query: F) -> Result<T, QueryError>
where
    F: Future<Output = Result<T, sqlx::Error>>,
{
    match tokio::time::timeout(limit, query).await {
        Ok(result) => result.map_err(QueryError::Database),
        Err(_) => Err(QueryError::Timeout(limit)),
    }
}

/// Entity collections, one table each.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Collection {
    Users,
    Tables,
    Menus,
    Foods,
    Orders,
    OrderItems,
    Invoices,
}

impl Collection {
    pub fn table_name(&self) -> &'static str {
        match self {
            Self::Users => "users",
            Self::Tables => "tables",
            Self::Menus => "menus",
            Self::Foods => "foods",
            Self::Orders => "orders",
            Self::OrderItems => "order_items",
            Self::Invoices => "invoices",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn timed_reports_elapsed_operations() {
        let slow = async {
            tokio::time::sleep(Duration::from_millis(200)).await;
            Ok::<_, sqlx::Error>(1)
        };

        let result = timed_with(Duration::from_millis(10), slow).await;

        assert!(matches!(result, Err(QueryError::Timeout(_))));
    }

    #[tokio::test]
    async fn timed_passes_through_results() {
        let fast = async { Ok::<_, sqlx::Error>(7) };

        assert_eq!(timed(fast).await.unwrap(), 7);

        let failing = async { Err::<i32, _>(sqlx::Error::RowNotFound) };

        assert!(matches!(
            timed(failing).await,
            Err(QueryError::Database(sqlx::Error::RowNotFound))
        ));
    }

    #[test]
    fn only_database_errors_name_a_violated_constraint() {
        assert_eq!(
            QueryError::Timeout(STORE_TIMEOUT).violated_unique_constraint(),
            None
        );
        assert_eq!(
            QueryError::Database(sqlx::Error::RowNotFound).violated_unique_constraint(),
            None
        );
    }

    #[test]
    fn collections_map_to_tables() {
        assert_eq!(Collection::OrderItems.table_name(), "order_items");
        assert_eq!(Collection::Users.table_name(), "users");
    }
}
