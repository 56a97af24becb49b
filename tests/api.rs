use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use restaurant_backend::{
    app::App,
    modules::auth::service::token::{self, Identity},
    types::{AppContext, AppEnvironment, AuthContext, Context},
    utils::database,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

const SECRET: &str = "integration-secret";

fn context(secret_key: Option<&str>) -> Arc<Context> {
    Arc::new(Context {
        app: AppContext {
            host: "127.0.0.1".to_string(),
            environment: AppEnvironment::Development,
            port: 8000,
            url: "http://127.0.0.1:8000".to_string(),
        },
        db_conn: database::connect_lazy("postgres://localhost/restaurant")
            .expect("lazy pool should build without a server"),
        auth: AuthContext::new(secret_key.map(String::from)),
    })
}

fn router(secret_key: Option<&str>) -> Router {
    App::new(context(secret_key)).router()
}

fn identity() -> Identity {
    Identity {
        email: "ada@example.com".to_string(),
        first_name: "Ada".to_string(),
        last_name: "Lovelace".to_string(),
        uid: "01HZZZZZZZZZZZZZZZZZZZZZZZ".to_string(),
    }
}

async fn send(router: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

    (status, body)
}

fn json_request(method: Method, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn health_check_responds() {
    let request = Request::builder().uri("/api").body(Body::empty()).unwrap();
    let (status, body) = send(router(Some(SECRET)), request).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["message"].is_string());
}

#[tokio::test]
async fn protected_routes_require_a_bearer_token() {
    for uri in [
        "/api/users",
        "/api/tables",
        "/api/menus/some-menu",
        "/api/order-items-order/some-order",
        "/api/invoices/some-invoice",
    ] {
        let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
        let (status, body) = send(router(Some(SECRET)), request).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED, "{} should be protected", uri);
        assert_eq!(body["error"], "No Authorization header provided");
    }
}

#[tokio::test]
async fn garbage_tokens_are_rejected() {
    let request = Request::builder()
        .uri("/api/foods")
        .header(header::AUTHORIZATION, "Bearer not.a.token")
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(router(Some(SECRET)), request).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Invalid session token");
}

#[tokio::test]
async fn tokens_signed_with_another_secret_are_rejected() {
    let foreign = AuthContext::new(Some("someone-else".to_string()));
    let pair = token::issue_token_pair(&foreign, identity()).unwrap();

    let request = Request::builder()
        .uri("/api/orders")
        .header(
            header::AUTHORIZATION,
            format!("Bearer {}", pair.access_token),
        )
        .body(Body::empty())
        .unwrap();
    let (status, _) = send(router(Some(SECRET)), request).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn refresh_tokens_cannot_authorize_requests() {
    let auth = AuthContext::new(Some(SECRET.to_string()));
    let pair = token::issue_token_pair(&auth, identity()).unwrap();

    let request = Request::builder()
        .uri("/api/tables")
        .header(
            header::AUTHORIZATION,
            format!("Bearer {}", pair.refresh_token),
        )
        .body(Body::empty())
        .unwrap();
    let (status, _) = send(router(Some(SECRET)), request).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn sign_up_validates_before_touching_the_store() {
    let request = json_request(
        Method::POST,
        "/api/users/signup",
        json!({
            "first_name": "A",
            "last_name": "Lovelace",
            "email": "not-an-email",
            "phone": "12",
            "password": "123",
        }),
    );
    let (status, body) = send(router(Some(SECRET)), request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    for field in ["first_name", "email", "phone", "password"] {
        assert!(
            body["errors"].get(field).is_some(),
            "{} should be reported",
            field
        );
    }
}

#[tokio::test]
async fn login_validates_the_email() {
    let request = json_request(
        Method::POST,
        "/api/users/login",
        json!({ "email": "nobody", "password": "secret" }),
    );
    let (status, body) = send(router(Some(SECRET)), request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["errors"].get("email").is_some());
}

#[tokio::test]
async fn refresh_rejects_access_tokens() {
    let auth = AuthContext::new(Some(SECRET.to_string()));
    let pair = token::issue_token_pair(&auth, identity()).unwrap();

    let request = json_request(
        Method::POST,
        "/api/users/refresh",
        json!({ "refresh_token": pair.access_token }),
    );
    let (status, body) = send(router(Some(SECRET)), request).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Invalid refresh token");
}

#[tokio::test]
async fn refresh_without_a_signing_secret_is_a_server_error() {
    let request = json_request(
        Method::POST,
        "/api/users/refresh",
        json!({ "refresh_token": "a.b.c" }),
    );
    let (status, _) = send(router(None), request).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}
