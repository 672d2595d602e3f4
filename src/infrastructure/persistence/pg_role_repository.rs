//! PostgreSQL implementation of role repository.

use async_trait::async_trait;
use sqlx::{FromRow, PgPool};
use std::sync::Arc;

use crate::domain::entities::{Role, RoleName};
use crate::domain::repositories::RoleRepository;
use crate::error::AppError;

#[derive(FromRow)]
struct RoleRow {
    id: i64,
    name: String,
    description: Option<String>,
}

impl RoleRow {
    /// Rows with names this build does not know are skipped.
    fn into_role(self) -> Option<Role> {
        match self.name.parse::<RoleName>() {
            Ok(name) => Some(Role {
                id: self.id,
                name,
                description: self.description,
            }),
            Err(e) => {
                tracing::warn!(error = %e, id = self.id, "Ignoring unknown role row");
                None
            }
        }
    }
}

/// PostgreSQL repository for the seeded `roles` table.
pub struct PgRoleRepository {
    pool: Arc<PgPool>,
}

impl PgRoleRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RoleRepository for PgRoleRepository {
    async fn find_by_name(&self, name: RoleName) -> Result<Option<Role>, AppError> {
        let row = sqlx::query_as::<_, RoleRow>(
            "SELECT id, name, description FROM roles WHERE name = $1",
        )
        .bind(name.as_str())
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.and_then(RoleRow::into_role))
    }

    async fn list(&self) -> Result<Vec<Role>, AppError> {
        let rows = sqlx::query_as::<_, RoleRow>(
            "SELECT id, name, description FROM roles ORDER BY id",
        )
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().filter_map(RoleRow::into_role).collect())
    }
}
