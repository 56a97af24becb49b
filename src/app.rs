use crate::{modules, types::Context};
use axum::{
    extract::DefaultBodyLimit,
    http::{header, Method},
    Extension, Router,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{cors, trace};

pub struct App {
    ctx: Arc<Context>,
    router: Router,
}

impl App {
    pub fn new(ctx: Arc<Context>) -> Self {
        let router = Router::new()
            .nest("/api", modules::get_router())
            .with_state(ctx.clone())
            .layer(
                ServiceBuilder::new()
                    .layer(trace::TraceLayer::new_for_http())
                    .layer(
                        cors::CorsLayer::new()
                            .allow_methods([
                                Method::OPTIONS,
                                Method::GET,
                                Method::POST,
                                Method::PATCH,
                            ])
                            .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
                            .allow_origin(cors::Any),
                    )
                    .layer(DefaultBodyLimit::max(1024 * 1024))
                    .layer(Extension(ctx.clone())),
            );

        Self { ctx, router }
    }

    pub fn router(&self) -> Router {
        self.router.clone()
    }

    pub async fn serve(self) -> std::io::Result<()> {
        let address = format!("{}:{}", self.ctx.app.host, self.ctx.app.port);
        let listener = TcpListener::bind(&address).await.map_err(|err| {
            tracing::error!("Failed to bind to {}: {}", address, err);
            err
        })?;

        tracing::info!("App is running on {} ({})", address, self.ctx.app.url);

        axum::serve(listener, self.router).await
    }
}
