//! Inspection record methods on Repository

use chrono::NaiveDate;

use super::Repository;
use crate::{
    error::{AppError, AppResult, ErrorCode},
    models::check::{CreateEpiCheck, EpiCheck, EpiCheckDetails, UpdateEpiCheck},
};

const CHECK_SELECT: &str = r#"
    SELECT ec.*,
           u.first_name || ' ' || u.last_name AS user_name,
           e.serial_number AS epi_serial_number,
           es.status_name AS status_name
    FROM epi_checks ec
    JOIN users u ON ec.user_id = u.id
    JOIN epis e ON ec.epi_id = e.id
    JOIN epi_statuses es ON ec.status_id = es.id
"#;

impl Repository {
    /// List all inspections, most recent first
    pub async fn checks_list(&self) -> AppResult<Vec<EpiCheckDetails>> {
        let q = format!("{} ORDER BY ec.check_date DESC, ec.id DESC", CHECK_SELECT);
        let rows = sqlx::query_as::<_, EpiCheckDetails>(&q)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    /// Get one inspection by ID
    pub async fn checks_get_by_id(&self, id: i32) -> AppResult<EpiCheckDetails> {
        let q = format!("{} WHERE ec.id = $1", CHECK_SELECT);
        sqlx::query_as::<_, EpiCheckDetails>(&q)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(ErrorCode::NoSuchCheck, format!("Inspection {} not found", id))
            })
    }

    /// List inspections of one EPI, most recent first
    pub async fn checks_list_by_epi(&self, epi_id: i32) -> AppResult<Vec<EpiCheckDetails>> {
        let q = format!(
            "{} WHERE ec.epi_id = $1 ORDER BY ec.check_date DESC, ec.id DESC",
            CHECK_SELECT
        );
        let rows = sqlx::query_as::<_, EpiCheckDetails>(&q)
            .bind(epi_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    /// Create inspection
    pub async fn checks_create(&self, data: &CreateEpiCheck) -> AppResult<EpiCheck> {
        let row = sqlx::query_as::<_, EpiCheck>(
            r#"
            INSERT INTO epi_checks (check_date, user_id, epi_id, status_id, remarks)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(data.check_date)
        .bind(data.user_id)
        .bind(data.epi_id)
        .bind(data.status_id)
        .bind(&data.remarks)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    /// Update inspection (only the provided fields)
    pub async fn checks_update(&self, id: i32, data: &UpdateEpiCheck) -> AppResult<EpiCheck> {
        let mut sets: Vec<String> = Vec::new();
        let mut idx = 1;

        macro_rules! add_field {
            ($field:expr, $name:expr) => {
                if $field.is_some() {
                    sets.push(format!("{} = ${}", $name, idx));
                    idx += 1;
                }
            };
        }

        add_field!(data.check_date, "check_date");
        add_field!(data.user_id, "user_id");
        add_field!(data.status_id, "status_id");
        add_field!(data.remarks, "remarks");

        if sets.is_empty() {
            let existing = self.checks_get_by_id(id).await?;
            return Ok(EpiCheck {
                id: existing.id,
                check_date: existing.check_date,
                user_id: existing.user_id,
                epi_id: existing.epi_id,
                status_id: existing.status_id,
                remarks: existing.remarks,
            });
        }

        let query = format!(
            "UPDATE epi_checks SET {} WHERE id = ${} RETURNING *",
            sets.join(", "),
            idx
        );

        let mut builder = sqlx::query_as::<_, EpiCheck>(&query);

        macro_rules! bind_field {
            ($field:expr) => {
                if let Some(ref val) = $field {
                    builder = builder.bind(val);
                }
            };
        }

        bind_field!(data.check_date);
        bind_field!(data.user_id);
        bind_field!(data.status_id);
        bind_field!(data.remarks);

        builder
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(ErrorCode::NoSuchCheck, format!("Inspection {} not found", id))
            })
    }

    /// Delete inspection
    pub async fn checks_delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM epi_checks WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(
                ErrorCode::NoSuchCheck,
                format!("Inspection {} not found", id),
            ));
        }
        Ok(())
    }

    /// All (epi_id, check_date) pairs, inputs for the due-date calculator
    pub async fn checks_dates(&self) -> AppResult<Vec<(i32, NaiveDate)>> {
        let rows = sqlx::query_as::<_, (i32, NaiveDate)>(
            "SELECT epi_id, check_date FROM epi_checks",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }
}
