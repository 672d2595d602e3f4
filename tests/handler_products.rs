mod common;

use axum::http::StatusCode;
use serde_json::json;
use sqlx::PgPool;

// ─── CREATE ──────────────────────────────────────────────────────────────────

#[sqlx::test]
async fn test_create_product_owned_by_caller(pool: PgPool) {
    let user = common::create_user(&pool, "Seller", "seller@example.com").await;
    let cat = common::create_test_category(&pool, "Electronics").await;
    let token = common::token_for(&pool, user).await;
    let server = common::make_server(pool);

    let response = server
        .post("/api/products")
        .authorization_bearer(&token)
        .json(&json!({
            "name": "Laptop",
            "price": 999.99,
            "description": "14 inch",
            "categoryIds": [cat, cat]
        }))
        .await;

    response.assert_status(StatusCode::CREATED);

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["name"], "Laptop");
    assert_eq!(json["price"], 999.99);
    assert_eq!(json["user"]["id"], user);
    assert_eq!(json["categories"].as_array().unwrap().len(), 1);
    assert!(json["createdAt"].is_string());
}

#[sqlx::test]
async fn test_create_product_for_other_user_requires_admin(pool: PgPool) {
    let user = common::create_user(&pool, "Seller", "seller@example.com").await;
    let other = common::create_user(&pool, "Other", "other@example.com").await;
    let cat = common::create_test_category(&pool, "Electronics").await;
    let token = common::token_for(&pool, user).await;
    let server = common::make_server(pool);

    let response = server
        .post("/api/products")
        .authorization_bearer(&token)
        .json(&json!({
            "name": "Laptop",
            "price": 10.0,
            "categoryIds": [cat],
            "userId": other
        }))
        .await;

    response.assert_status_forbidden();
}

#[sqlx::test]
async fn test_admin_creates_product_for_other_user(pool: PgPool) {
    let admin = common::create_admin(&pool).await;
    let other = common::create_user(&pool, "Other", "other@example.com").await;
    let cat = common::create_test_category(&pool, "Electronics").await;
    let token = common::token_for(&pool, admin).await;
    let server = common::make_server(pool);

    let response = server
        .post("/api/products")
        .authorization_bearer(&token)
        .json(&json!({
            "name": "Gift",
            "price": 10.0,
            "categoryIds": [cat],
            "userId": other
        }))
        .await;

    response.assert_status(StatusCode::CREATED);
    assert_eq!(response.json::<serde_json::Value>()["user"]["id"], other);
}

#[sqlx::test]
async fn test_create_product_validation(pool: PgPool) {
    let user = common::create_user(&pool, "Seller", "seller@example.com").await;
    let token = common::token_for(&pool, user).await;
    let server = common::make_server(pool);

    let response = server
        .post("/api/products")
        .authorization_bearer(&token)
        .json(&json!({ "name": "Freebie", "price": 0, "categoryIds": [] }))
        .await;

    response.assert_status_bad_request();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["details"].as_object().unwrap().len(), 2);
}

#[sqlx::test]
async fn test_create_product_unknown_category(pool: PgPool) {
    let user = common::create_user(&pool, "Seller", "seller@example.com").await;
    let cat = common::create_test_category(&pool, "Electronics").await;
    let token = common::token_for(&pool, user).await;
    let server = common::make_server(pool);

    let response = server
        .post("/api/products")
        .authorization_bearer(&token)
        .json(&json!({ "name": "Laptop", "price": 5.0, "categoryIds": [cat, 999999] }))
        .await;

    response.assert_status_not_found();
    assert_eq!(
        response.json::<serde_json::Value>()["details"]["ids"],
        json!([999999])
    );
}

#[sqlx::test]
async fn test_create_duplicate_product_name(pool: PgPool) {
    let user = common::create_user(&pool, "Seller", "seller@example.com").await;
    let cat = common::create_test_category(&pool, "Electronics").await;
    common::create_test_product(&pool, "Laptop", 5.0, user, &[cat]).await;
    let token = common::token_for(&pool, user).await;
    let server = common::make_server(pool);

    let response = server
        .post("/api/products")
        .authorization_bearer(&token)
        .json(&json!({ "name": "Laptop", "price": 6.0, "categoryIds": [cat] }))
        .await;

    response.assert_status(StatusCode::CONFLICT);
}

// ─── LISTING ─────────────────────────────────────────────────────────────────

#[sqlx::test]
async fn test_list_all_products_admin_only(pool: PgPool) {
    let admin = common::create_admin(&pool).await;
    let user = common::create_user(&pool, "Regular", "regular@example.com").await;
    let admin_token = common::token_for(&pool, admin).await;
    let user_token = common::token_for(&pool, user).await;
    let server = common::make_server(pool);

    server
        .get("/api/products")
        .authorization_bearer(&admin_token)
        .await
        .assert_status_ok();

    server
        .get("/api/products")
        .authorization_bearer(&user_token)
        .await
        .assert_status_forbidden();
}

#[sqlx::test]
async fn test_paginated_products(pool: PgPool) {
    let user = common::create_user(&pool, "Seller", "seller@example.com").await;
    let cat = common::create_test_category(&pool, "All").await;
    for (name, price) in [("Delta", 4.0), ("Alpha", 1.0), ("Charlie", 3.0), ("Bravo", 2.0)] {
        common::create_test_product(&pool, name, price, user, &[cat]).await;
    }
    let token = common::token_for(&pool, user).await;
    let server = common::make_server(pool);

    let response = server
        .get("/api/products/paginated")
        .add_query_param("page", 0)
        .add_query_param("size", 3)
        .add_query_param("sort", "name,asc")
        .authorization_bearer(&token)
        .await;

    response.assert_status_ok();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["totalElements"], 4);
    assert_eq!(json["totalPages"], 2);
    assert_eq!(json["numberOfElements"], 3);
    assert_eq!(json["first"], true);
    assert_eq!(json["last"], false);
    assert_eq!(json["content"][0]["name"], "Alpha");
    assert_eq!(json["content"][2]["name"], "Charlie");
}

#[sqlx::test]
async fn test_paginated_rejects_bad_parameters(pool: PgPool) {
    let user = common::create_user(&pool, "Seller", "seller@example.com").await;
    let token = common::token_for(&pool, user).await;
    let server = common::make_server(pool);

    server
        .get("/api/products/paginated?size=0")
        .authorization_bearer(&token)
        .await
        .assert_status_bad_request();

    server
        .get("/api/products/paginated?page=-1")
        .authorization_bearer(&token)
        .await
        .assert_status_bad_request();

    server
        .get("/api/products/paginated?sort=password,asc")
        .authorization_bearer(&token)
        .await
        .assert_status_bad_request();

    server
        .get("/api/products/paginated?page=abc")
        .authorization_bearer(&token)
        .await
        .assert_status_bad_request();
}

#[sqlx::test]
async fn test_slice_products(pool: PgPool) {
    let user = common::create_user(&pool, "Seller", "seller@example.com").await;
    let cat = common::create_test_category(&pool, "All").await;
    for name in ["One", "Two", "Three"] {
        common::create_test_product(&pool, name, 1.0, user, &[cat]).await;
    }
    let token = common::token_for(&pool, user).await;
    let server = common::make_server(pool);

    let response = server
        .get("/api/products/slice?page=0&size=2&sort=createdAt,desc")
        .authorization_bearer(&token)
        .await;

    response.assert_status_ok();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["numberOfElements"], 2);
    assert_eq!(json["hasNext"], true);
    assert_eq!(json["hasPrevious"], false);
    assert!(json.get("totalElements").is_none());
}

#[sqlx::test]
async fn test_search_products(pool: PgPool) {
    let user = common::create_user(&pool, "Seller", "seller@example.com").await;
    let tech = common::create_test_category(&pool, "Tech").await;
    let home = common::create_test_category(&pool, "Home").await;
    common::create_test_product(&pool, "Gaming Laptop", 1500.0, user, &[tech]).await;
    common::create_test_product(&pool, "Office Laptop", 700.0, user, &[tech]).await;
    common::create_test_product(&pool, "Laptop Stand", 40.0, user, &[home]).await;
    let token = common::token_for(&pool, user).await;
    let server = common::make_server(pool);

    let response = server
        .get(&format!(
            "/api/products/search?name=LAPTOP&minPrice=500&maxPrice=2000&categoryId={}&sort=price,desc",
            tech
        ))
        .authorization_bearer(&token)
        .await;

    response.assert_status_ok();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["totalElements"], 2);
    assert_eq!(json["content"][0]["name"], "Gaming Laptop");
    assert_eq!(json["content"][1]["name"], "Office Laptop");
}

#[sqlx::test]
async fn test_search_with_multiple_sort_params(pool: PgPool) {
    let user = common::create_user(&pool, "Seller", "seller@example.com").await;
    let cat = common::create_test_category(&pool, "All").await;
    common::create_test_product(&pool, "Bbb", 10.0, user, &[cat]).await;
    common::create_test_product(&pool, "Aaa", 10.0, user, &[cat]).await;
    common::create_test_product(&pool, "Ccc", 5.0, user, &[cat]).await;
    let token = common::token_for(&pool, user).await;
    let server = common::make_server(pool);

    let response = server
        .get("/api/products/search?sort=price,desc&sort=name,asc")
        .authorization_bearer(&token)
        .await;

    response.assert_status_ok();

    let json = response.json::<serde_json::Value>();
    let names: Vec<&str> = json["content"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Aaa", "Bbb", "Ccc"]);
}

#[sqlx::test]
async fn test_search_inverted_price_range(pool: PgPool) {
    let user = common::create_user(&pool, "Seller", "seller@example.com").await;
    let token = common::token_for(&pool, user).await;
    let server = common::make_server(pool);

    let response = server
        .get("/api/products/search?minPrice=100&maxPrice=10")
        .authorization_bearer(&token)
        .await;

    response.assert_status_bad_request();
}

#[sqlx::test]
async fn test_products_by_user_and_category(pool: PgPool) {
    let alice = common::create_user(&pool, "Alice", "alice@example.com").await;
    let bob = common::create_user(&pool, "Bob", "bob@example.com").await;
    let books = common::create_test_category(&pool, "Books").await;
    let toys = common::create_test_category(&pool, "Toys").await;
    common::create_test_product(&pool, "Alice Book", 10.0, alice, &[books]).await;
    common::create_test_product(&pool, "Alice Toy", 20.0, alice, &[toys]).await;
    common::create_test_product(&pool, "Bob Book", 30.0, bob, &[books]).await;
    let token = common::token_for(&pool, bob).await;
    let server = common::make_server(pool);

    let by_user = server
        .get(&format!("/api/products/user/{}?sort=price,desc", alice))
        .authorization_bearer(&token)
        .await;
    by_user.assert_status_ok();
    let json = by_user.json::<serde_json::Value>();
    assert_eq!(json["totalElements"], 2);
    assert_eq!(json["content"][0]["name"], "Alice Toy");

    let by_category = server
        .get(&format!("/api/products/category/{}", books))
        .authorization_bearer(&token)
        .await;
    by_category.assert_status_ok();
    assert_eq!(
        by_category.json::<serde_json::Value>().as_array().unwrap().len(),
        2
    );

    server
        .get("/api/products/user/999999")
        .authorization_bearer(&token)
        .await
        .assert_status_not_found();

    server
        .get("/api/products/category/999999")
        .authorization_bearer(&token)
        .await
        .assert_status_not_found();
}

// ─── GET / UPDATE / DELETE ───────────────────────────────────────────────────

#[sqlx::test]
async fn test_get_product(pool: PgPool) {
    let user = common::create_user(&pool, "Seller", "seller@example.com").await;
    let cat = common::create_test_category(&pool, "Books").await;
    let id = common::create_test_product(&pool, "Novel", 12.5, user, &[cat]).await;
    let token = common::token_for(&pool, user).await;
    let server = common::make_server(pool);

    let response = server
        .get(&format!("/api/products/{}", id))
        .authorization_bearer(&token)
        .await;

    response.assert_status_ok();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["id"], id);
    assert_eq!(json["user"]["email"], "seller@example.com");
    assert_eq!(json["categories"][0]["name"], "Books");

    server
        .get("/api/products/999999")
        .authorization_bearer(&token)
        .await
        .assert_status_not_found();
}

#[sqlx::test]
async fn test_owner_updates_product(pool: PgPool) {
    let user = common::create_user(&pool, "Seller", "seller@example.com").await;
    let books = common::create_test_category(&pool, "Books").await;
    let toys = common::create_test_category(&pool, "Toys").await;
    let id = common::create_test_product(&pool, "Novel", 12.5, user, &[books]).await;
    let token = common::token_for(&pool, user).await;
    let server = common::make_server(pool);

    let response = server
        .put(&format!("/api/products/{}", id))
        .authorization_bearer(&token)
        .json(&json!({
            "name": "Pop-up Novel",
            "price": 15.0,
            "categoryIds": [books, toys]
        }))
        .await;

    response.assert_status_ok();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["name"], "Pop-up Novel");
    assert_eq!(json["categories"].as_array().unwrap().len(), 2);
}

#[sqlx::test]
async fn test_non_owner_cannot_modify(pool: PgPool) {
    let owner = common::create_user(&pool, "Owner", "owner@example.com").await;
    let intruder = common::create_user(&pool, "Intruder", "intruder@example.com").await;
    let cat = common::create_test_category(&pool, "Books").await;
    let id = common::create_test_product(&pool, "Novel", 12.5, owner, &[cat]).await;
    let token = common::token_for(&pool, intruder).await;
    let server = common::make_server(pool);

    server
        .put(&format!("/api/products/{}", id))
        .authorization_bearer(&token)
        .json(&json!({ "name": "Stolen", "price": 1.0, "categoryIds": [cat] }))
        .await
        .assert_status_forbidden();

    server
        .delete(&format!("/api/products/{}", id))
        .authorization_bearer(&token)
        .await
        .assert_status_forbidden();
}

#[sqlx::test]
async fn test_moderator_deletes_any_product(pool: PgPool) {
    let owner = common::create_user(&pool, "Owner", "owner@example.com").await;
    let moderator = common::create_moderator(&pool).await;
    let cat = common::create_test_category(&pool, "Books").await;
    let id = common::create_test_product(&pool, "Novel", 12.5, owner, &[cat]).await;
    let token = common::token_for(&pool, moderator).await;
    let server = common::make_server(pool);

    server
        .delete(&format!("/api/products/{}", id))
        .authorization_bearer(&token)
        .await
        .assert_status(StatusCode::NO_CONTENT);

    server
        .get(&format!("/api/products/{}", id))
        .authorization_bearer(&token)
        .await
        .assert_status_not_found();
}

#[sqlx::test]
async fn test_non_numeric_id_is_bad_request(pool: PgPool) {
    let user = common::create_user(&pool, "Seller", "seller@example.com").await;
    let token = common::token_for(&pool, user).await;
    let server = common::make_server(pool);

    server
        .get("/api/products/not-a-number")
        .authorization_bearer(&token)
        .await
        .assert_status_bad_request();
}
