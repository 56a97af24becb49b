pub use crate::utils::database;
use async_trait::async_trait;
use chrono::Duration;
use std::env;

#[derive(Clone, Debug, PartialEq)]
pub enum AppEnvironment {
    Production,
    Development,
}

impl AppEnvironment {
    pub fn from(raw_environment: String) -> Self {
        match raw_environment.as_ref() {
            "production" => Self::Production,
            _ => Self::Development,
        }
    }
}

impl ToString for AppEnvironment {
    fn to_string(&self) -> String {
        match self {
            Self::Production => String::from("production"),
            Self::Development => String::from("development"),
        }
    }
}

#[derive(Clone)]
pub struct AppContext {
    pub host: String,
    pub environment: AppEnvironment,
    pub port: u32,
    pub url: String,
}

#[derive(Clone)]
pub struct AuthContext {
    pub secret_key: Option<String>,
    pub access_token_ttl: Duration,
    pub refresh_token_ttl: Duration,
}

impl AuthContext {
    pub fn new(secret_key: Option<String>) -> Self {
        Self {
            secret_key: secret_key.filter(|key| !key.is_empty()),
            access_token_ttl: Duration::hours(24),
            refresh_token_ttl: Duration::hours(24 * 7),
        }
    }
}

#[derive(Clone)]
pub struct Context {
    pub app: AppContext,
    pub db_conn: database::DatabaseConnection,
    pub auth: AuthContext,
}

#[derive(Clone)]
pub struct DatabaseConfig {
    pub url: String,
}

#[derive(Clone)]
pub struct AppConfig {
    pub host: String,
    pub environment: AppEnvironment,
    pub port: u32,
    pub url: String,
}

#[derive(Clone)]
pub struct AuthConfig {
    pub secret_key: Option<String>,
}

#[derive(Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub app: AppConfig,
    pub auth: AuthConfig,
}

impl Default for Config {
    fn default() -> Self {
        let database_url = env::var("DATABASE_URL").expect("DATABASE_URL not set");
        let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let environment = env::var("APP_ENV").unwrap_or_else(|_| "development".to_string());
        let port = env::var("PORT")
            .unwrap_or_else(|_| "8000".to_string())
            .parse::<u32>()
            .expect("Invalid PORT number");
        let url = env::var("URL").unwrap_or_else(|_| format!("http://{}:{}", host, port));
        let secret_key = env::var("SECRET_KEY").ok();

        if secret_key.is_none() {
            tracing::warn!("SECRET_KEY not set, tokens cannot be issued or validated");
        }

        Self {
            database: DatabaseConfig { url: database_url },
            app: AppConfig {
                host,
                environment: AppEnvironment::from(environment),
                port,
                url,
            },
            auth: AuthConfig { secret_key },
        }
    }
}

#[async_trait]
pub trait ToContext {
    async fn to_context(self) -> Context;
}

#[async_trait]
impl ToContext for Config {
    async fn to_context(self) -> Context {
        let db_conn = database::connect(self.database.url.as_str()).await;
        database::migrate(db_conn.clone()).await;

        tracing::debug!(
            "Context ready for the {} environment",
            self.app.environment.to_string()
        );

        Context {
            app: AppContext {
                host: self.app.host,
                environment: self.app.environment,
                port: self.app.port,
                url: self.app.url,
            },
            db_conn,
            auth: AuthContext::new(self.auth.secret_key),
        }
    }
}
