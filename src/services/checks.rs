//! Inspection service: history CRUD and the due worklist

use chrono::NaiveDate;
use std::collections::HashMap;
use validator::Validate;

use crate::{
    api::checks::DueEpiEntry,
    error::{AppError, AppResult},
    models::check::{CreateEpiCheck, EpiCheck, EpiCheckDetails, UpdateEpiCheck},
    repository::Repository,
    schedule,
};

#[derive(Clone)]
pub struct ChecksService {
    repository: Repository,
}

impl ChecksService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> AppResult<Vec<EpiCheckDetails>> {
        self.repository.checks_list().await
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<EpiCheckDetails> {
        self.repository.checks_get_by_id(id).await
    }

    pub async fn list_by_epi(&self, epi_id: i32) -> AppResult<Vec<EpiCheckDetails>> {
        // 404 on unknown equipment rather than an empty list
        self.repository.epis_get_by_id(epi_id).await?;
        self.repository.checks_list_by_epi(epi_id).await
    }

    pub async fn create(&self, data: &CreateEpiCheck) -> AppResult<EpiCheck> {
        data.validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        let epi = self.repository.epis_get_by_id(data.epi_id).await?;
        self.repository.users_get_by_id(data.user_id).await?;
        self.repository.epi_statuses_get_by_id(data.status_id).await?;

        // An inspection cannot precede the equipment's entry into service
        assert_check_after_service_start(epi.service_start_date, data.check_date)?;

        self.repository.checks_create(data).await
    }

    pub async fn update(&self, id: i32, data: &UpdateEpiCheck) -> AppResult<EpiCheck> {
        data.validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;
        if let Some(user_id) = data.user_id {
            self.repository.users_get_by_id(user_id).await?;
        }
        if let Some(status_id) = data.status_id {
            self.repository.epi_statuses_get_by_id(status_id).await?;
        }
        // A moved check date must still respect the service-start bound
        if let Some(check_date) = data.check_date {
            let existing = self.repository.checks_get_by_id(id).await?;
            let epi = self.repository.epis_get_by_id(existing.epi_id).await?;
            assert_check_after_service_start(epi.service_start_date, check_date)?;
        }
        self.repository.checks_update(id, data).await
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.repository.checks_delete(id).await
    }

    /// Equipment due for inspection within 30 days as of the given date,
    /// most overdue first.
    pub async fn due_list(&self, as_of: NaiveDate) -> AppResult<Vec<DueEpiEntry>> {
        let epis = self.repository.epis_list().await?;
        let checks_by_epi = group_check_dates(self.repository.checks_dates().await?);

        let due = schedule::list_due_equipment(&epis, &checks_by_epi, as_of);

        let by_id: HashMap<i32, &crate::models::epi::Epi> =
            epis.iter().map(|e| (e.id, e)).collect();

        Ok(due
            .into_iter()
            .filter_map(|status| {
                by_id.get(&status.epi_id).map(|epi| DueEpiEntry {
                    epi: (*epi).clone(),
                    days_until_next_check: status.days_until_next_check,
                    urgency: status.urgency,
                })
            })
            .collect())
    }
}

/// Group raw (epi_id, check_date) pairs into the calculator's input shape
pub(crate) fn group_check_dates(pairs: Vec<(i32, NaiveDate)>) -> HashMap<i32, Vec<NaiveDate>> {
    let mut grouped: HashMap<i32, Vec<NaiveDate>> = HashMap::new();
    for (epi_id, date) in pairs {
        grouped.entry(epi_id).or_default().push(date);
    }
    grouped
}

/// Reject an inspection date earlier than the equipment's service start
fn assert_check_after_service_start(
    service_start: Option<NaiveDate>,
    check_date: NaiveDate,
) -> AppResult<()> {
    if let Some(start) = service_start {
        if check_date < start {
            return Err(AppError::Validation(format!(
                "Check date {} precedes service start date {}",
                check_date, start
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
    fn check_date_before_service_start_is_rejected() {
        let err = assert_check_after_service_start(Some(date(2024, 6, 1)), date(2024, 1, 1));
        assert!(matches!(err, Err(AppError::Validation(_))));
    }

    #[test]
    fn check_date_on_or_after_service_start_is_accepted() {
        assert!(assert_check_after_service_start(Some(date(2024, 6, 1)), date(2024, 6, 1)).is_ok());
        assert!(assert_check_after_service_start(Some(date(2024, 6, 1)), date(2024, 7, 1)).is_ok());
        // No recorded service start: nothing to compare against
        assert!(assert_check_after_service_start(None, date(2024, 1, 1)).is_ok());
    }
}
