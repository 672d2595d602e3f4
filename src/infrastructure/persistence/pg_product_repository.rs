//! PostgreSQL implementation of product repository.
//!
//! Products are loaded in two queries: the product rows joined with their
//! owner, then all categories of those products in one `= ANY($1)` lookup.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::json;
use sqlx::{FromRow, PgConnection, PgPool, Postgres, QueryBuilder};
use std::collections::HashMap;
use std::sync::Arc;

use crate::domain::entities::{
    Category, NewProduct, Product, ProductFilter, ProductOwner, ProductUpdate,
};
use crate::domain::pagination::{Page, PageRequest, SortOrder, Slice};
use crate::domain::repositories::ProductRepository;
use crate::error::AppError;

const PRODUCT_SELECT: &str = r#"
    SELECT p.id, p.name, p.price, p.description, p.created_at, p.updated_at,
           u.id AS owner_id, u.name AS owner_name, u.email AS owner_email
    FROM products p
    JOIN users u ON u.id = p.owner_id
"#;

#[derive(FromRow)]
struct ProductRow {
    id: i64,
    name: String,
    price: f64,
    description: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    owner_id: i64,
    owner_name: String,
    owner_email: String,
}

impl ProductRow {
    fn into_product(self, categories: Vec<Category>) -> Product {
        Product {
            id: self.id,
            name: self.name,
            price: self.price,
            description: self.description,
            owner: ProductOwner {
                id: self.owner_id,
                name: self.owner_name,
                email: self.owner_email,
            },
            categories,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(FromRow)]
struct ProductCategoryRow {
    product_id: i64,
    id: i64,
    name: String,
    description: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Escapes `LIKE` wildcards so user input matches literally.
pub(crate) fn escape_like(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        if matches!(c, '\\' | '%' | '_') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Appends the `WHERE` clause for `filter`. Expects `products` aliased as `p`.
fn push_filter(qb: &mut QueryBuilder<'_, Postgres>, filter: &ProductFilter) {
    qb.push(" WHERE TRUE");

    if let Some(name) = &filter.name {
        qb.push(" AND p.name ILIKE ")
            .push_bind(format!("%{}%", escape_like(name)));
    }
    if let Some(min) = filter.min_price {
        qb.push(" AND p.price >= ").push_bind(min);
    }
    if let Some(max) = filter.max_price {
        qb.push(" AND p.price <= ").push_bind(max);
    }
    if let Some(owner_id) = filter.owner_id {
        qb.push(" AND p.owner_id = ").push_bind(owner_id);
    }
    if let Some(category_id) = filter.category_id {
        qb.push(
            " AND EXISTS (SELECT 1 FROM product_categories pc WHERE pc.product_id = p.id AND pc.category_id = ",
        )
        .push_bind(category_id)
        .push(")");
    }
}

/// Column names come from [`SortOrder`], never from request input.
fn push_order(qb: &mut QueryBuilder<'_, Postgres>, orders: &[SortOrder]) {
    qb.push(" ORDER BY ");
    let clauses: Vec<String> = orders
        .iter()
        .map(|o| format!("p.{} {}", o.field.column(), o.direction.as_sql()))
        .collect();
    qb.push(clauses.join(", "));
}

async fn link_categories(
    conn: &mut PgConnection,
    product_id: i64,
    category_ids: &[i64],
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO product_categories (product_id, category_id)
        SELECT $1, UNNEST($2::BIGINT[])
        ON CONFLICT DO NOTHING
        "#,
    )
    .bind(product_id)
    .bind(category_ids)
    .execute(conn)
    .await?;

    Ok(())
}

/// PostgreSQL repository for products.
///
/// Category links are written in the same transaction as the product row.
pub struct PgProductRepository {
    pool: Arc<PgPool>,
}

impl PgProductRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }

    async fn with_categories(&self, rows: Vec<ProductRow>) -> Result<Vec<Product>, AppError> {
        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<i64> = rows.iter().map(|r| r.id).collect();

        let links = sqlx::query_as::<_, ProductCategoryRow>(
            r#"
            SELECT pc.product_id, c.id, c.name, c.description, c.created_at, c.updated_at
            FROM product_categories pc
            JOIN categories c ON c.id = pc.category_id
            WHERE pc.product_id = ANY($1)
            ORDER BY c.name
            "#,
        )
        .bind(&ids)
        .fetch_all(self.pool.as_ref())
        .await?;

        let mut by_product: HashMap<i64, Vec<Category>> = HashMap::new();
        for link in links {
            by_product.entry(link.product_id).or_default().push(Category {
                id: link.id,
                name: link.name,
                description: link.description,
                created_at: link.created_at,
                updated_at: link.updated_at,
            });
        }

        Ok(rows
            .into_iter()
            .map(|row| {
                let categories = by_product.remove(&row.id).unwrap_or_default();
                row.into_product(categories)
            })
            .collect())
    }

    async fn fetch_existing(&self, id: i64) -> Result<Product, AppError> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Product not found", json!({ "id": id })))
    }

    async fn fetch_rows(
        &self,
        filter: &ProductFilter,
        page: &PageRequest,
        limit: i64,
    ) -> Result<Vec<ProductRow>, AppError> {
        let mut qb = QueryBuilder::<Postgres>::new(PRODUCT_SELECT);
        push_filter(&mut qb, filter);
        push_order(&mut qb, &page.orders_with_tiebreaker());
        qb.push(" LIMIT ")
            .push_bind(limit)
            .push(" OFFSET ")
            .push_bind(page.offset());

        let rows = qb
            .build_query_as::<ProductRow>()
            .fetch_all(self.pool.as_ref())
            .await?;

        Ok(rows)
    }

    async fn count(&self, filter: &ProductFilter) -> Result<i64, AppError> {
        let mut qb = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM products p");
        push_filter(&mut qb, filter);

        let total: i64 = qb
            .build_query_scalar()
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(total)
    }
}

#[async_trait]
impl ProductRepository for PgProductRepository {
    async fn create(&self, new_product: NewProduct) -> Result<Product, AppError> {
        let mut tx = self.pool.begin().await?;

        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO products (name, price, description, owner_id)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(&new_product.name)
        .bind(new_product.price)
        .bind(&new_product.description)
        .bind(new_product.owner_id)
        .fetch_one(&mut *tx)
        .await?;

        link_categories(&mut tx, id, &new_product.category_ids).await?;

        tx.commit().await?;

        self.fetch_existing(id).await
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Product>, AppError> {
        let sql = format!("{PRODUCT_SELECT} WHERE p.id = $1");

        let row = sqlx::query_as::<_, ProductRow>(&sql)
            .bind(id)
            .fetch_optional(self.pool.as_ref())
            .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        Ok(self.with_categories(vec![row]).await?.pop())
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Product>, AppError> {
        let sql = format!("{PRODUCT_SELECT} WHERE p.name = $1");

        let row = sqlx::query_as::<_, ProductRow>(&sql)
            .bind(name)
            .fetch_optional(self.pool.as_ref())
            .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        Ok(self.with_categories(vec![row]).await?.pop())
    }

    async fn update(&self, id: i64, update: ProductUpdate) -> Result<Product, AppError> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            r#"
            UPDATE products
            SET name = $2, price = $3, description = $4, updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(&update.name)
        .bind(update.price)
        .bind(&update.description)
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            tx.rollback().await?;
            return Err(AppError::not_found("Product not found", json!({ "id": id })));
        }

        sqlx::query("DELETE FROM product_categories WHERE product_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        link_categories(&mut tx, id, &update.category_ids).await?;

        tx.commit().await?;

        self.fetch_existing(id).await
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn list(&self, filter: ProductFilter) -> Result<Vec<Product>, AppError> {
        let mut qb = QueryBuilder::<Postgres>::new(PRODUCT_SELECT);
        push_filter(&mut qb, &filter);
        qb.push(" ORDER BY p.id");

        let rows = qb
            .build_query_as::<ProductRow>()
            .fetch_all(self.pool.as_ref())
            .await?;

        self.with_categories(rows).await
    }

    async fn find_page(
        &self,
        filter: ProductFilter,
        page: PageRequest,
    ) -> Result<Page<Product>, AppError> {
        let (rows, total) = tokio::try_join!(
            self.fetch_rows(&filter, &page, page.limit()),
            self.count(&filter)
        )?;

        let content = self.with_categories(rows).await?;

        Ok(Page::new(content, &page, total))
    }

    async fn find_slice(
        &self,
        filter: ProductFilter,
        page: PageRequest,
    ) -> Result<Slice<Product>, AppError> {
        let rows = self.fetch_rows(&filter, &page, page.limit() + 1).await?;
        let content = self.with_categories(rows).await?;

        Ok(Slice::from_overfetch(content, &page))
    }
}
