//! Tests against a live Postgres server. `sqlx::test` creates a fresh database
//! per test from `DATABASE_URL` and applies `migrations/` to it.
//!
//! Run with `cargo test --test store -- --ignored`.

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use bigdecimal::BigDecimal;
use restaurant_backend::{
    app::App,
    modules::{
        auth::service::password,
        food, menu, order, order_item, table,
        user::{self, repository::CreateUserPayload},
    },
    types::{AppContext, AppEnvironment, AuthContext, Context},
    utils::database::DatabaseConnection,
};
use serde_json::{json, Value};
use sqlx::PgPool;
use std::{str::FromStr, sync::Arc};
use tower::ServiceExt;

fn router(pool: &PgPool) -> Router {
    App::new(Arc::new(Context {
        app: AppContext {
            host: "127.0.0.1".to_string(),
            environment: AppEnvironment::Development,
            port: 8000,
            url: "http://127.0.0.1:8000".to_string(),
        },
        db_conn: DatabaseConnection { pool: pool.clone() },
        auth: AuthContext::new(Some("store-secret".to_string())),
    }))
    .router()
}

async fn sign_up(pool: &PgPool, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/users/signup")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();

    let response = router(pool).oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();

    (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
}

fn grace() -> Value {
    json!({
        "first_name": "Grace",
        "last_name": "Hopper",
        "email": "Grace@Example.com",
        "phone": "+15550100",
        "password": "cobol-forever",
    })
}

async fn user_count(pool: &PgPool) -> i64 {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users")
        .fetch_one(pool)
        .await
        .unwrap()
}

fn new_user(email: &str, phone: &str) -> CreateUserPayload {
    CreateUserPayload {
        first_name: "Ada".to_string(),
        last_name: "Lovelace".to_string(),
        email: email.to_string(),
        phone: phone.to_string(),
        password_hash: password::hash("analytical").unwrap(),
        avatar: None,
    }
}

#[sqlx::test]
#[ignore = "needs a Postgres server at DATABASE_URL"]
async fn sign_up_stores_the_hash_and_the_issued_tokens(pool: PgPool) {
    let (status, body) = sign_up(&pool, grace()).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["user"]["email"], "grace@example.com");
    assert!(body["user"].get("password").is_none());

    let stored = user::repository::find_by_email(&pool, "grace@example.com".to_string())
        .await
        .unwrap()
        .unwrap();

    assert_ne!(stored.password, "cobol-forever");
    assert!(password::verify("cobol-forever", &stored.password));
    assert!(!password::verify("cobol-never", &stored.password));
    assert_eq!(stored.token.as_deref(), body["access_token"].as_str());
    assert_eq!(
        stored.refresh_token.as_deref(),
        body["refresh_token"].as_str()
    );
}

#[sqlx::test]
#[ignore = "needs a Postgres server at DATABASE_URL"]
async fn sign_up_conflicts_leave_the_store_untouched(pool: PgPool) {
    let (status, _) = sign_up(&pool, grace()).await;
    assert_eq!(status, StatusCode::CREATED);

    let mut same_email = grace();
    same_email["phone"] = json!("+15550199");
    let (status, body) = sign_up(&pool, same_email).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body["error"].is_string());

    let mut same_phone = grace();
    same_phone["email"] = json!("hopper@example.com");
    let (status, _) = sign_up(&pool, same_phone).await;
    assert_eq!(status, StatusCode::CONFLICT);

    assert_eq!(user_count(&pool).await, 1);
}

#[sqlx::test]
#[ignore = "needs a Postgres server at DATABASE_URL"]
async fn duplicate_inserts_report_the_taken_field(pool: PgPool) {
    user::repository::create(&pool, new_user("ada@example.com", "+15550001"))
        .await
        .unwrap();

    assert_eq!(
        user::repository::create(&pool, new_user("ada@example.com", "+15550002"))
            .await
            .unwrap_err(),
        user::repository::Error::EmailAlreadyInUse
    );
    assert_eq!(
        user::repository::create(&pool, new_user("byron@example.com", "+15550001"))
            .await
            .unwrap_err(),
        user::repository::Error::PhoneNumberAlreadyInUse
    );
    assert_eq!(user_count(&pool).await, 1);
}

#[sqlx::test]
#[ignore = "needs a Postgres server at DATABASE_URL"]
async fn order_lines_survive_deleted_foods_and_tables(pool: PgPool) {
    let table = table::repository::create(
        &pool,
        table::repository::CreateTablePayload {
            number_of_guests: 4,
            table_number: 12,
        },
    )
    .await
    .unwrap();
    let menu = menu::repository::create(
        &pool,
        menu::repository::CreateMenuPayload {
            name: "Dinner".to_string(),
            category: "Mains".to_string(),
            start_date: None,
            end_date: None,
        },
    )
    .await
    .unwrap();

    let mut foods = vec![];
    for (name, price) in [("Jollof", "12.00"), ("Zobo", "3.00")] {
        let food = food::repository::create(
            &pool,
            food::repository::CreateFoodPayload {
                name: name.to_string(),
                price: BigDecimal::from_str(price).unwrap(),
                food_image: format!("https://img.example.com/{}.png", name),
                menu_id: menu.id.clone(),
            },
        )
        .await
        .unwrap();
        foods.push(food);
    }

    let order = order::repository::create(
        &pool,
        order::repository::CreateOrderPayload {
            table_id: table.id.clone(),
        },
    )
    .await
    .unwrap();

    for (food, quantity, unit_price) in [(&foods[0], 2, "11.00"), (&foods[1], 3, "4.50")] {
        order_item::repository::create(
            &pool,
            order_item::repository::CreateOrderItemPayload {
                order_id: order.id.clone(),
                food_id: food.id.clone(),
                quantity,
                unit_price: BigDecimal::from_str(unit_price).unwrap(),
            },
        )
        .await
        .unwrap();
    }

    let lines = order_item::repository::find_lines_by_order_id(&pool, order.id.clone())
        .await
        .unwrap();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0].table_number, Some(12));
    assert_eq!(lines[1].price, BigDecimal::from_str("3.00").unwrap());

    sqlx::query("DELETE FROM foods WHERE id = $1")
        .bind(&foods[1].id)
        .execute(&pool)
        .await
        .unwrap();
    sqlx::query("DELETE FROM tables WHERE id = $1")
        .bind(&table.id)
        .execute(&pool)
        .await
        .unwrap();

    let lines = order_item::repository::find_lines_by_order_id(&pool, order.id.clone())
        .await
        .unwrap();
    assert_eq!(lines.len(), 2);

    assert_eq!(lines[0].food_name.as_deref(), Some("Jollof"));
    assert_eq!(lines[0].price, BigDecimal::from_str("12.00").unwrap());
    assert_eq!(lines[0].quantity, 2);

    assert_eq!(lines[1].food_name, None);
    assert_eq!(lines[1].food_image, None);
    assert_eq!(lines[1].price, BigDecimal::from_str("4.50").unwrap());
    assert_eq!(lines[1].quantity, 3);

    for line in &lines {
        assert_eq!(line.table_number, None);
        assert_eq!(line.table_id, None);
        assert_eq!(line.order_id, order.id);
    }
}
