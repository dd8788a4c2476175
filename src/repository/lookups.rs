//! Reference table methods on Repository (EPI types and statuses)

use super::Repository;
use crate::{
    error::{AppError, AppResult, ErrorCode},
    models::lookup::{EpiStatus, EpiType},
};

impl Repository {
    /// List all EPI types
    pub async fn epi_types_list(&self) -> AppResult<Vec<EpiType>> {
        let rows = sqlx::query_as::<_, EpiType>("SELECT * FROM epi_types ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    /// Get EPI type by ID
    pub async fn epi_types_get_by_id(&self, id: i32) -> AppResult<EpiType> {
        sqlx::query_as::<_, EpiType>("SELECT * FROM epi_types WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(ErrorCode::NoSuchData, format!("EPI type {} not found", id))
            })
    }

    /// List all EPI statuses
    pub async fn epi_statuses_list(&self) -> AppResult<Vec<EpiStatus>> {
        let rows = sqlx::query_as::<_, EpiStatus>("SELECT * FROM epi_statuses ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    /// Get EPI status by ID
    pub async fn epi_statuses_get_by_id(&self, id: i16) -> AppResult<EpiStatus> {
        sqlx::query_as::<_, EpiStatus>("SELECT * FROM epi_statuses WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(ErrorCode::NoSuchData, format!("EPI status {} not found", id))
            })
    }
}
