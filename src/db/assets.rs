//! Asset record CRUD operations.

use crate::error::DatabaseError;
use crate::{Error, Result};

use super::{AssetContentUpdate, AssetRecord, Database, NewAsset};

impl Database {
    /// Insert a new asset record
    ///
    /// Fails with [`DatabaseError::ConstraintViolation`] when a record already
    /// exists at the same container and path.
    pub async fn insert_asset(&self, asset: &NewAsset) -> Result<i64> {
        let now = chrono::Utc::now().timestamp();

        let result = sqlx::query(
            r#"
            INSERT INTO assets (
                container, path, title, size_bytes, sha256, mime_type,
                created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&asset.container)
        .bind(&asset.path)
        .bind(&asset.title)
        .bind(asset.size_bytes)
        .bind(&asset.sha256)
        .bind(&asset.mime_type)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                Error::Database(DatabaseError::ConstraintViolation(format!(
                    "asset {}::{} already exists",
                    asset.container, asset.path
                )))
            }
            _ => Error::Database(DatabaseError::QueryFailed(format!(
                "Failed to insert asset: {}",
                e
            ))),
        })?;

        Ok(result.last_insert_rowid())
    }

    /// Get the asset record at a container-relative path
    pub async fn find_asset(&self, container: &str, path: &str) -> Result<Option<AssetRecord>> {
        let row = sqlx::query_as::<_, AssetRecord>(
            r#"
            SELECT
                id, container, path, title, size_bytes, sha256, mime_type,
                created_at, updated_at
            FROM assets
            WHERE container = ? AND path = ?
            "#,
        )
        .bind(container)
        .bind(path)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            Error::Database(DatabaseError::QueryFailed(format!(
                "Failed to get asset: {}",
                e
            )))
        })?;

        Ok(row)
    }

    /// Check whether a record exists at a container-relative path
    pub async fn asset_exists(&self, container: &str, path: &str) -> Result<bool> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM assets WHERE container = ? AND path = ?")
                .bind(container)
                .bind(path)
                .fetch_one(&self.pool)
                .await
                .map_err(|e| {
                    Error::Database(DatabaseError::QueryFailed(format!(
                        "Failed to check asset existence: {}",
                        e
                    )))
                })?;

        Ok(count > 0)
    }

    /// List all asset records of a container, ordered by path
    pub async fn list_assets(&self, container: &str) -> Result<Vec<AssetRecord>> {
        let rows = sqlx::query_as::<_, AssetRecord>(
            r#"
            SELECT
                id, container, path, title, size_bytes, sha256, mime_type,
                created_at, updated_at
            FROM assets
            WHERE container = ?
            ORDER BY path ASC
            "#,
        )
        .bind(container)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            Error::Database(DatabaseError::QueryFailed(format!(
                "Failed to list assets: {}",
                e
            )))
        })?;

        Ok(rows)
    }

    /// Replace the content metadata of an existing record
    ///
    /// Returns `false` when no record with that ID exists.
    pub async fn update_asset_content(&self, id: i64, update: &AssetContentUpdate) -> Result<bool> {
        let now = chrono::Utc::now().timestamp();

        let result = sqlx::query(
            r#"
            UPDATE assets
            SET size_bytes = ?, sha256 = ?, mime_type = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(update.size_bytes)
        .bind(&update.sha256)
        .bind(&update.mime_type)
        .bind(now)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            Error::Database(DatabaseError::QueryFailed(format!(
                "Failed to update asset content: {}",
                e
            )))
        })?;

        Ok(result.rows_affected() > 0)
    }

    /// Delete an asset record
    pub async fn delete_asset(&self, id: i64) -> Result<()> {
        sqlx::query("DELETE FROM assets WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                Error::Database(DatabaseError::QueryFailed(format!(
                    "Failed to delete asset: {}",
                    e
                )))
            })?;

        Ok(())
    }
}
