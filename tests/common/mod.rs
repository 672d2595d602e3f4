#![allow(dead_code)]

use axum::ServiceExt;
use axum::extract::Request;
use axum_test::TestServer;
use catalog_api::domain::entities::RoleName;
use catalog_api::domain::repositories::UserRepository;
use catalog_api::infrastructure::persistence::PgUserRepository;
use catalog_api::infrastructure::security::{JwtService, PasswordHasher};
use catalog_api::routes::app_router;
use catalog_api::state::AppState;
use chrono::Duration;
use sqlx::PgPool;
use std::net::SocketAddr;
use std::sync::Arc;

pub const TEST_SECRET: &str = "test-signing-secret-with-32-bytes!!";
pub const TEST_PASSWORD: &str = "password123";

pub fn test_jwt() -> JwtService {
    JwtService::new(TEST_SECRET, "catalog-api", Duration::minutes(30))
}

pub fn create_test_state(pool: PgPool) -> AppState {
    AppState::new(
        Arc::new(pool),
        Arc::new(test_jwt()),
        PasswordHasher::new(4),
    )
}

/// The full application router served over a local socket, so the
/// rate limiter sees a peer address just as in production.
pub fn make_server(pool: PgPool) -> TestServer {
    let app = app_router(create_test_state(pool));

    TestServer::new(ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app))
        .unwrap()
}

pub async fn create_test_user(pool: &PgPool, name: &str, email: &str, roles: &[RoleName]) -> i64 {
    let hash = bcrypt::hash(TEST_PASSWORD, 4).unwrap();

    let id: i64 = sqlx::query_scalar(
        "INSERT INTO users (name, email, password_hash) VALUES ($1, $2, $3) RETURNING id",
    )
    .bind(name)
    .bind(email)
    .bind(hash)
    .fetch_one(pool)
    .await
    .unwrap();

    let names: Vec<&str> = roles.iter().map(RoleName::as_str).collect();
    sqlx::query(
        "INSERT INTO user_roles (user_id, role_id) SELECT $1, id FROM roles WHERE name = ANY($2)",
    )
    .bind(id)
    .bind(&names)
    .execute(pool)
    .await
    .unwrap();

    id
}

pub async fn create_user(pool: &PgPool, name: &str, email: &str) -> i64 {
    create_test_user(pool, name, email, &[RoleName::User]).await
}

pub async fn create_admin(pool: &PgPool) -> i64 {
    create_test_user(
        pool,
        "Admin",
        "admin@example.com",
        &[RoleName::User, RoleName::Admin],
    )
    .await
}

pub async fn create_moderator(pool: &PgPool) -> i64 {
    create_test_user(
        pool,
        "Moderator",
        "moderator@example.com",
        &[RoleName::User, RoleName::Moderator],
    )
    .await
}

pub async fn create_test_category(pool: &PgPool, name: &str) -> i64 {
    sqlx::query_scalar("INSERT INTO categories (name) VALUES ($1) RETURNING id")
        .bind(name)
        .fetch_one(pool)
        .await
        .unwrap()
}

pub async fn create_test_product(
    pool: &PgPool,
    name: &str,
    price: f64,
    owner_id: i64,
    category_ids: &[i64],
) -> i64 {
    let id: i64 = sqlx::query_scalar(
        "INSERT INTO products (name, price, owner_id) VALUES ($1, $2, $3) RETURNING id",
    )
    .bind(name)
    .bind(price)
    .bind(owner_id)
    .fetch_one(pool)
    .await
    .unwrap();

    sqlx::query(
        "INSERT INTO product_categories (product_id, category_id) SELECT $1, UNNEST($2::BIGINT[])",
    )
    .bind(id)
    .bind(category_ids)
    .execute(pool)
    .await
    .unwrap();

    id
}

/// Issues a token for an existing user, as login would.
pub async fn token_for(pool: &PgPool, user_id: i64) -> String {
    let repo = PgUserRepository::new(Arc::new(pool.clone()));
    let user = repo.find_by_id(user_id).await.unwrap().unwrap();
    test_jwt().generate_token(&user).unwrap()
}
