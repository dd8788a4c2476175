//! EPI domain methods on Repository

use super::Repository;
use crate::{
    error::{AppError, AppResult, ErrorCode},
    models::epi::{CreateEpi, Epi, UpdateEpi},
};

const EPI_SELECT: &str = r#"
    SELECT e.*, et.type_name AS type_name, es.status_name AS status_name
    FROM epis e
    JOIN epi_types et ON e.epi_type_id = et.id
    JOIN epi_statuses es ON e.status_id = es.id
"#;

impl Repository {
    /// List all EPIs with their type and status names
    pub async fn epis_list(&self) -> AppResult<Vec<Epi>> {
        let q = format!("{} ORDER BY e.id", EPI_SELECT);
        let rows = sqlx::query_as::<_, Epi>(&q).fetch_all(&self.pool).await?;
        Ok(rows)
    }

    /// Get EPI by ID
    pub async fn epis_get_by_id(&self, id: i32) -> AppResult<Epi> {
        let q = format!("{} WHERE e.id = $1", EPI_SELECT);
        sqlx::query_as::<_, Epi>(&q)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(ErrorCode::NoSuchEpi, format!("EPI {} not found", id)))
    }

    /// Create EPI
    pub async fn epis_create(&self, data: &CreateEpi) -> AppResult<Epi> {
        let id: i32 = sqlx::query_scalar(
            r#"
            INSERT INTO epis (brand, model, serial_number, size, color, purchase_date,
                              manufacture_date, service_start_date, periodicity,
                              epi_type_id, status_id, end_of_life_date)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            RETURNING id
            "#,
        )
        .bind(&data.brand)
        .bind(&data.model)
        .bind(&data.serial_number)
        .bind(&data.size)
        .bind(&data.color)
        .bind(data.purchase_date)
        .bind(data.manufacture_date)
        .bind(data.service_start_date)
        .bind(data.periodicity)
        .bind(data.epi_type_id)
        .bind(data.status_id)
        .bind(data.end_of_life_date)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db) if db.is_unique_violation() => {
                AppError::Conflict(format!("Serial number {} already exists", data.serial_number))
            }
            other => AppError::Database(other),
        })?;

        self.epis_get_by_id(id).await
    }

    /// Update EPI (only the provided fields)
    pub async fn epis_update(&self, id: i32, data: &UpdateEpi) -> AppResult<Epi> {
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

        add_field!(data.brand, "brand");
        add_field!(data.model, "model");
        add_field!(data.serial_number, "serial_number");
        add_field!(data.size, "size");
        add_field!(data.color, "color");
        add_field!(data.purchase_date, "purchase_date");
        add_field!(data.manufacture_date, "manufacture_date");
        add_field!(data.service_start_date, "service_start_date");
        add_field!(data.periodicity, "periodicity");
        add_field!(data.epi_type_id, "epi_type_id");
        add_field!(data.status_id, "status_id");
        add_field!(data.end_of_life_date, "end_of_life_date");

        if sets.is_empty() {
            return self.epis_get_by_id(id).await;
        }

        let query = format!(
            "UPDATE epis SET {} WHERE id = ${}",
            sets.join(", "),
            idx
        );

        let mut builder = sqlx::query(&query);

        macro_rules! bind_field {
            ($field:expr) => {
                if let Some(ref val) = $field {
                    builder = builder.bind(val);
                }
            };
        }

        bind_field!(data.brand);
        bind_field!(data.model);
        bind_field!(data.serial_number);
        bind_field!(data.size);
        bind_field!(data.color);
        bind_field!(data.purchase_date);
        bind_field!(data.manufacture_date);
        bind_field!(data.service_start_date);
        bind_field!(data.periodicity);
        bind_field!(data.epi_type_id);
        bind_field!(data.status_id);
        bind_field!(data.end_of_life_date);

        let result = builder.bind(id).execute(&self.pool).await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(
                ErrorCode::NoSuchEpi,
                format!("EPI {} not found", id),
            ));
        }

        self.epis_get_by_id(id).await
    }

    /// Delete EPI
    pub async fn epis_delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM epis WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(
                ErrorCode::NoSuchEpi,
                format!("EPI {} not found", id),
            ));
        }
        Ok(())
    }
}
