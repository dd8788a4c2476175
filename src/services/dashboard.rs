//! Dashboard service

use chrono::NaiveDate;
use sqlx::Row;

use crate::{
    api::dashboard::{DashboardResponse, StatEntry},
    error::AppResult,
    repository::Repository,
    schedule,
    services::checks::group_check_dates,
};

/// Trailing window of the inspection-history histogram, in months
const HISTORY_MONTHS: u32 = 12;

#[derive(Clone)]
pub struct DashboardService {
    repository: Repository,
}

impl DashboardService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Assemble the dashboard: inventory counts, pending-check urgency
    /// counts and the monthly inspection histogram.
    ///
    /// Pending counts are a reduction over the same due list the worklist
    /// endpoint serves, so the two views cannot disagree.
    pub async fn get_dashboard(&self, as_of: NaiveDate) -> AppResult<DashboardResponse> {
        let pool = &self.repository.pool;

        let epi_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM epis")
            .fetch_one(pool)
            .await?;

        let by_type: Vec<StatEntry> = sqlx::query(
            r#"
            SELECT et.type_name AS label, COUNT(*) AS value
            FROM epis e
            JOIN epi_types et ON e.epi_type_id = et.id
            GROUP BY et.type_name
            ORDER BY value DESC
            "#,
        )
        .fetch_all(pool)
        .await?
        .into_iter()
        .map(|row| StatEntry {
            label: row.get("label"),
            value: row.get("value"),
        })
        .collect();

        let by_status: Vec<StatEntry> = sqlx::query(
            r#"
            SELECT es.status_name AS label, COUNT(*) AS value
            FROM epis e
            JOIN epi_statuses es ON e.status_id = es.id
            GROUP BY es.status_name
            ORDER BY value DESC
            "#,
        )
        .fetch_all(pool)
        .await?
        .into_iter()
        .map(|row| StatEntry {
            label: row.get("label"),
            value: row.get("value"),
        })
        .collect();

        let epis = self.repository.epis_list().await?;
        let check_pairs = self.repository.checks_dates().await?;
        let check_dates: Vec<NaiveDate> = check_pairs.iter().map(|(_, d)| *d).collect();
        let checks_by_epi = group_check_dates(check_pairs);

        let due = schedule::list_due_equipment(&epis, &checks_by_epi, as_of);
        let pending_checks = schedule::summarize_due_counts(&due);

        let checks_history =
            schedule::summarize_inspection_history(&check_dates, HISTORY_MONTHS, as_of);

        Ok(DashboardResponse {
            epi_count,
            by_type,
            by_status,
            pending_checks,
            checks_history,
        })
    }
}
