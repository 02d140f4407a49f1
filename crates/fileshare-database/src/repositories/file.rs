//! File repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use fileshare_core::error::{AppError, ErrorKind};
use fileshare_core::result::AppResult;
use fileshare_core::types::pagination::{PageRequest, PageResponse};
use fileshare_entity::file::{CreateFile, File, UpdateFile};

use super::escape_like;
use crate::store::FileStore;

/// Repository for file CRUD and listing queries.
#[derive(Debug, Clone)]
pub struct FileRepository {
    pool: PgPool,
}

impl FileRepository {
    /// Create a new file repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FileStore for FileRepository {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<File>> {
        sqlx::query_as::<_, File>("SELECT * FROM files WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find file", e))
    }

    async fn find_public_by_name(
        &self,
        query: Option<&str>,
        page: &PageRequest,
    ) -> AppResult<PageResponse<File>> {
        let pattern = query.map(|q| format!("%{}%", escape_like(q)));

        let total: i64 = sqlx::query_scalar(
            r"SELECT COUNT(*) FROM files
              WHERE access = 'public' AND ($1::text IS NULL OR name ILIKE $1 ESCAPE '\')",
        )
        .bind(&pattern)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count files", e))?;

        let files = sqlx::query_as::<_, File>(
            r"SELECT * FROM files
              WHERE access = 'public' AND ($1::text IS NULL OR name ILIKE $1 ESCAPE '\')
              ORDER BY created_at DESC, id DESC
              LIMIT $2 OFFSET $3",
        )
        .bind(&pattern)
        .bind(i64::try_from(page.limit()).unwrap_or(i64::MAX))
        .bind(i64::try_from(page.offset()).unwrap_or(i64::MAX))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list files", e))?;

        Ok(PageResponse::new(
            files,
            page.page,
            page.page_size,
            total as u64,
        ))
    }

    async fn find_public_by_author(
        &self,
        author_id: Uuid,
        page: &PageRequest,
    ) -> AppResult<PageResponse<File>> {
        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM files WHERE author_id = $1 AND access = 'public'",
        )
        .bind(author_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count files", e))?;

        let files = sqlx::query_as::<_, File>(
            "SELECT * FROM files WHERE author_id = $1 AND access = 'public' \
             ORDER BY created_at DESC, id DESC LIMIT $2 OFFSET $3",
        )
        .bind(author_id)
        .bind(i64::try_from(page.limit()).unwrap_or(i64::MAX))
        .bind(i64::try_from(page.offset()).unwrap_or(i64::MAX))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list files by author", e)
        })?;

        Ok(PageResponse::new(
            files,
            page.page,
            page.page_size,
            total as u64,
        ))
    }

    async fn create(&self, data: &CreateFile) -> AppResult<File> {
        sqlx::query_as::<_, File>(
            "INSERT INTO files (id, name, author_id, access, storage_path, original_filename, \
             mime_type, size_bytes) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) RETURNING *",
        )
        .bind(data.id)
        .bind(&data.name)
        .bind(data.author_id)
        .bind(data.access)
        .bind(&data.storage_path)
        .bind(&data.original_filename)
        .bind(&data.mime_type)
        .bind(data.size_bytes)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create file", e))
    }

    async fn update(&self, id: Uuid, data: &UpdateFile) -> AppResult<Option<File>> {
        let blob = data.blob.as_ref();

        sqlx::query_as::<_, File>(
            "UPDATE files SET \
             name = COALESCE($2, name), \
             access = COALESCE($3, access), \
             storage_path = COALESCE($4, storage_path), \
             original_filename = COALESCE($5, original_filename), \
             mime_type = CASE WHEN $4::text IS NULL THEN mime_type ELSE $6 END, \
             size_bytes = COALESCE($7, size_bytes), \
             updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(&data.name)
        .bind(data.access)
        .bind(blob.map(|b| b.storage_path.as_str()))
        .bind(blob.map(|b| b.original_filename.as_str()))
        .bind(blob.and_then(|b| b.mime_type.as_deref()))
        .bind(blob.map(|b| b.size_bytes))
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update file", e))
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM files WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete file", e))?;
        Ok(result.rows_affected() > 0)
    }

    async fn health_check(&self) -> AppResult<bool> {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|v| v == 1)
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Health check failed", e))
    }
}
