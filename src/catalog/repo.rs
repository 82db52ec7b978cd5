use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

/// Catalog entry used as an access-grant target; the icon field holds the
/// stored object key.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CatalogModule {
    pub id: Uuid,
    pub name: String,
    pub submodules: Vec<String>,
    pub description: String,
    pub icon: String,
    pub created_at: OffsetDateTime,
}

const COLUMNS: &str = "id, name, submodules, description, icon, created_at";

impl CatalogModule {
    pub async fn find_by_name(db: &PgPool, name: &str) -> anyhow::Result<Option<CatalogModule>> {
        let module = sqlx::query_as::<_, CatalogModule>(&format!(
            "SELECT {COLUMNS} FROM modules WHERE name = $1"
        ))
        .bind(name)
        .fetch_optional(db)
        .await?;
        Ok(module)
    }

    pub async fn find_by_id(db: &PgPool, id: Uuid) -> anyhow::Result<Option<CatalogModule>> {
        let module = sqlx::query_as::<_, CatalogModule>(&format!(
            "SELECT {COLUMNS} FROM modules WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(db)
        .await?;
        Ok(module)
    }

    pub async fn list(db: &PgPool) -> anyhow::Result<Vec<CatalogModule>> {
        let modules = sqlx::query_as::<_, CatalogModule>(&format!(
            "SELECT {COLUMNS} FROM modules ORDER BY created_at DESC"
        ))
        .fetch_all(db)
        .await?;
        Ok(modules)
    }

    pub async fn create(
        db: &PgPool,
        name: &str,
        submodules: &[String],
        description: &str,
        icon: &str,
    ) -> anyhow::Result<CatalogModule> {
        let module = sqlx::query_as::<_, CatalogModule>(&format!(
            r#"
            INSERT INTO modules (name, submodules, description, icon)
            VALUES ($1, $2, $3, $4)
            RETURNING {COLUMNS}
            "#
        ))
        .bind(name)
        .bind(submodules)
        .bind(description)
        .bind(icon)
        .fetch_one(db)
        .await?;
        Ok(module)
    }

    /// Overwrite name, submodules and description; keep the stored icon when
    /// no replacement is supplied.
    pub async fn update(
        db: &PgPool,
        id: Uuid,
        name: &str,
        submodules: &[String],
        description: &str,
        icon: Option<&str>,
    ) -> anyhow::Result<Option<CatalogModule>> {
        let module = sqlx::query_as::<_, CatalogModule>(&format!(
            r#"
            UPDATE modules SET
                name        = $2,
                submodules  = $3,
                description = $4,
                icon        = COALESCE($5, icon)
            WHERE id = $1
            RETURNING {COLUMNS}
            "#
        ))
        .bind(id)
        .bind(name)
        .bind(submodules)
        .bind(description)
        .bind(icon)
        .fetch_optional(db)
        .await?;
        Ok(module)
    }

    pub async fn delete(db: &PgPool, id: Uuid) -> anyhow::Result<Option<CatalogModule>> {
        let module = sqlx::query_as::<_, CatalogModule>(&format!(
            "DELETE FROM modules WHERE id = $1 RETURNING {COLUMNS}"
        ))
        .bind(id)
        .fetch_optional(db)
        .await?;
        Ok(module)
    }
}
