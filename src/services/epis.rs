//! EPI inventory service

use chrono::NaiveDate;
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::epi::{CreateEpi, Epi, UpdateEpi},
    models::lookup::{EpiStatus, EpiType},
    repository::Repository,
};

#[derive(Clone)]
pub struct EpisService {
    repository: Repository,
}

impl EpisService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> AppResult<Vec<Epi>> {
        self.repository.epis_list().await
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<Epi> {
        self.repository.epis_get_by_id(id).await
    }

    pub async fn create(&self, data: &CreateEpi) -> AppResult<Epi> {
        data.validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;
        // Referenced type and status must exist
        self.repository.epi_types_get_by_id(data.epi_type_id).await?;
        self.repository.epi_statuses_get_by_id(data.status_id).await?;
        self.repository.epis_create(data).await
    }

    pub async fn update(&self, id: i32, data: &UpdateEpi) -> AppResult<Epi> {
        data.validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;
        if let Some(type_id) = data.epi_type_id {
            self.repository.epi_types_get_by_id(type_id).await?;
        }
        if let Some(status_id) = data.status_id {
            self.repository.epi_statuses_get_by_id(status_id).await?;
        }
        // The service start cannot move past inspections already on record
        if let Some(start) = data.service_start_date {
            let checks = self.repository.checks_list_by_epi(id).await?;
            let earliest = checks.iter().map(|c| c.check_date).min();
            assert_start_covers_history(start, earliest)?;
        }
        self.repository.epis_update(id, data).await
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.repository.epis_delete(id).await
    }

    pub async fn list_types(&self) -> AppResult<Vec<EpiType>> {
        self.repository.epi_types_list().await
    }

    pub async fn get_type_by_id(&self, id: i32) -> AppResult<EpiType> {
        self.repository.epi_types_get_by_id(id).await
    }

    pub async fn list_statuses(&self) -> AppResult<Vec<EpiStatus>> {
        self.repository.epi_statuses_list().await
    }

    pub async fn get_status_by_id(&self, id: i16) -> AppResult<EpiStatus> {
        self.repository.epi_statuses_get_by_id(id).await
    }
}

/// Reject a service-start date later than the earliest recorded inspection
fn assert_start_covers_history(
    new_start: NaiveDate,
    earliest_check: Option<NaiveDate>,
) -> AppResult<()> {
    if let Some(earliest) = earliest_check {
        if earliest < new_start {
            return Err(AppError::Validation(format!(
                "Service start date {} postdates an inspection recorded on {}",
                new_start, earliest
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn service_start_after_recorded_check_is_rejected() {
        let err = assert_start_covers_history(date(2024, 6, 1), Some(date(2024, 3, 1)));
        assert!(matches!(err, Err(AppError::Validation(_))));
    }

    #[test]
    fn service_start_covering_all_checks_is_accepted() {
        assert!(assert_start_covers_history(date(2024, 3, 1), Some(date(2024, 3, 1))).is_ok());
        assert!(assert_start_covers_history(date(2024, 3, 1), Some(date(2024, 5, 1))).is_ok());
        assert!(assert_start_covers_history(date(2024, 3, 1), None).is_ok());
    }
}
