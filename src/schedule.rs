//! Inspection due-date calculator.
//!
//! Pure date arithmetic over equipment records and their inspection
//! histories: next due date, signed day-count, urgency classification and
//! the aggregations consumed by the due-list endpoint and the dashboard.
//! All functions take `as_of` explicitly instead of reading the clock, so
//! results are a deterministic function of their inputs.

use std::collections::HashMap;

use chrono::{Datelike, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

use crate::{
    error::AppError,
    models::{enums::EpiStatusCode, epi::Epi},
};

/// Error raised for malformed equipment records.
///
/// Always a data-integrity problem in the store, never retryable. Batch
/// computations skip the offending record and log instead of aborting.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    #[error("invalid equipment record: {0}")]
    InvalidInput(String),
}

impl From<ScheduleError> for AppError {
    fn from(e: ScheduleError) -> Self {
        AppError::Validation(e.to_string())
    }
}

/// Urgency tier derived from the signed day-count to the next inspection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Urgency {
    /// Overdue or due today (days ≤ 0)
    Urgent,
    /// Due within a week (1..=7 days)
    Soon,
    /// Due within a month (8..=30 days)
    Upcoming,
    /// More than 30 days out; excluded from due worklists
    NotDue,
}

/// Computed due status for one piece of equipment (never persisted)
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DueStatus {
    pub epi_id: i32,
    /// Negative = overdue, zero = due today, positive = days remaining
    pub days_until_next_check: i64,
    pub urgency: Urgency,
}

/// Aggregate counts over a due list, one field per urgency tier
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, ToSchema)]
pub struct DueCounts {
    pub total: i64,
    pub urgent: i64,
    pub soon: i64,
    pub upcoming: i64,
}

/// One month of the inspection-history histogram
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct MonthlyCheckCount {
    /// Calendar month, "YYYY-MM"
    pub month: String,
    pub count: i64,
}

/// Next due date: baseline + periodicity calendar months.
///
/// Month-add preserves the day-of-month where valid and clamps to the last
/// day of the target month otherwise (Jan 31 + 1 month → Feb 28/29).
pub fn next_due_date(baseline: NaiveDate, periodicity: i32) -> Result<NaiveDate, ScheduleError> {
    if periodicity <= 0 {
        return Err(ScheduleError::InvalidInput(format!(
            "periodicity must be positive, got {}",
            periodicity
        )));
    }
    baseline
        .checked_add_months(Months::new(periodicity as u32))
        .ok_or_else(|| {
            ScheduleError::InvalidInput(format!(
                "due date out of range for baseline {} + {} months",
                baseline, periodicity
            ))
        })
}

/// Whole calendar days from `as_of` to the equipment's next due date.
///
/// The baseline is the most recent inspection date when one exists,
/// otherwise the service-start date.
pub fn days_until_next_check(
    epi: &Epi,
    last_check: Option<NaiveDate>,
    as_of: NaiveDate,
) -> Result<i64, ScheduleError> {
    let service_start = epi.service_start_date.ok_or_else(|| {
        ScheduleError::InvalidInput(format!("EPI {} has no service start date", epi.id))
    })?;
    let baseline = last_check.unwrap_or(service_start);
    let due = next_due_date(baseline, epi.periodicity)?;
    Ok((due - as_of).num_days())
}

/// Map a day-count to its urgency tier.
///
/// Boundaries are inclusive at the upper bound of each tier: 0 is Urgent,
/// 7 is Soon, 30 is Upcoming, 31 is NotDue.
pub fn classify_urgency(days_until_next_check: i64) -> Urgency {
    if days_until_next_check <= 0 {
        Urgency::Urgent
    } else if days_until_next_check <= 7 {
        Urgency::Soon
    } else if days_until_next_check <= 30 {
        Urgency::Upcoming
    } else {
        Urgency::NotDue
    }
}

/// Build the due worklist for a set of equipment.
///
/// Only in-service equipment participates. Entries more than 30 days out
/// are dropped. Malformed records are skipped with a warning so that one
/// bad row cannot take down reporting for the whole fleet. Output is
/// ordered by day-count ascending, ties broken by EPI id.
pub fn list_due_equipment(
    epis: &[Epi],
    checks_by_epi: &HashMap<i32, Vec<NaiveDate>>,
    as_of: NaiveDate,
) -> Vec<DueStatus> {
    let mut due: Vec<DueStatus> = Vec::new();

    for epi in epis {
        if EpiStatusCode::from(epi.status_id) != EpiStatusCode::InService {
            continue;
        }

        let last_check = checks_by_epi
            .get(&epi.id)
            .and_then(|dates| dates.iter().max())
            .copied();

        let days = match days_until_next_check(epi, last_check, as_of) {
            Ok(days) => days,
            Err(e) => {
                tracing::warn!(epi_id = epi.id, error = %e, "skipping EPI in due-list computation");
                continue;
            }
        };

        let urgency = classify_urgency(days);
        if urgency == Urgency::NotDue {
            continue;
        }

        due.push(DueStatus {
            epi_id: epi.id,
            days_until_next_check: days,
            urgency,
        });
    }

    due.sort_by_key(|d| (d.days_until_next_check, d.epi_id));
    due
}

/// Reduce a due list to its per-tier counts.
///
/// The dashboard must obtain its counts through this function so the
/// summary can never diverge from the worklist it summarizes.
pub fn summarize_due_counts(due_list: &[DueStatus]) -> DueCounts {
    let mut counts = DueCounts::default();
    for entry in due_list {
        counts.total += 1;
        match entry.urgency {
            Urgency::Urgent => counts.urgent += 1,
            Urgency::Soon => counts.soon += 1,
            Urgency::Upcoming => counts.upcoming += 1,
            Urgency::NotDue => {}
        }
    }
    counts
}

/// Bucket inspection dates by calendar month over the trailing
/// `months_back` months ending at `as_of`.
///
/// Months without any inspection are emitted with an explicit zero count;
/// the consuming chart relies on a gap-free, chronologically ascending
/// series.
pub fn summarize_inspection_history(
    check_dates: &[NaiveDate],
    months_back: u32,
    as_of: NaiveDate,
) -> Vec<MonthlyCheckCount> {
    if months_back == 0 {
        return Vec::new();
    }

    let end_month = first_of_month(as_of);
    let start_month = match end_month.checked_sub_months(Months::new(months_back - 1)) {
        Some(d) => d,
        None => return Vec::new(),
    };

    let mut counts: HashMap<NaiveDate, i64> = HashMap::new();
    for date in check_dates {
        let month = first_of_month(*date);
        if month >= start_month && month <= end_month {
            *counts.entry(month).or_insert(0) += 1;
        }
    }

    let mut history = Vec::with_capacity(months_back as usize);
    let mut month = start_month;
    while month <= end_month {
        history.push(MonthlyCheckCount {
            month: format!("{:04}-{:02}", month.year(), month.month()),
            count: counts.get(&month).copied().unwrap_or(0),
        });
        month = match month.checked_add_months(Months::new(1)) {
            Some(d) => d,
            None => break,
        };
    }
    history
}

fn first_of_month(date: NaiveDate) -> NaiveDate {
    // Day 1 always exists
    date.with_day(1).unwrap_or(date)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn epi(id: i32, service_start: Option<NaiveDate>, periodicity: i32, status_id: i16) -> Epi {
        Epi {
            id,
            brand: "Petzl".to_string(),
            model: "Vertex".to_string(),
            serial_number: format!("SN-{:04}", id),
            size: None,
            color: None,
            purchase_date: None,
            manufacture_date: None,
            service_start_date: service_start,
            periodicity,
            epi_type_id: 1,
            status_id,
            end_of_life_date: None,
            type_name: None,
            status_name: None,
        }
    }

    #[test]
    fn due_date_without_history_anchors_on_service_start() {
        let e = epi(1, Some(date(2023, 3, 10)), 6, 1);
        let days = days_until_next_check(&e, None, date(2023, 9, 1)).unwrap();
        // due 2023-09-10
        assert_eq!(days, 9);
    }

    #[test]
    fn due_date_with_history_anchors_on_latest_check() {
        let e = epi(1, Some(date(2020, 1, 1)), 6, 1);
        let days = days_until_next_check(&e, Some(date(2023, 6, 1)), date(2023, 12, 15)).unwrap();
        // due 2023-12-01, 14 days overdue
        assert_eq!(days, -14);
    }

    #[test]
    fn month_add_clamps_to_end_of_month() {
        assert_eq!(next_due_date(date(2023, 1, 31), 1).unwrap(), date(2023, 2, 28));
        assert_eq!(next_due_date(date(2024, 1, 31), 1).unwrap(), date(2024, 2, 29));
        assert_eq!(next_due_date(date(2023, 8, 31), 1).unwrap(), date(2023, 9, 30));
    }

    #[test]
    fn non_positive_periodicity_is_invalid() {
        assert!(matches!(next_due_date(date(2023, 1, 1), 0), Err(ScheduleError::InvalidInput(_))));
        assert!(matches!(next_due_date(date(2023, 1, 1), -3), Err(ScheduleError::InvalidInput(_))));
    }

    #[test]
    fn missing_service_start_is_invalid() {
        let e = epi(1, None, 6, 1);
        assert!(matches!(
            days_until_next_check(&e, None, date(2023, 1, 1)),
            Err(ScheduleError::InvalidInput(_))
        ));
    }

    #[test]
    fn urgency_boundaries() {
        assert_eq!(classify_urgency(-100), Urgency::Urgent);
        assert_eq!(classify_urgency(0), Urgency::Urgent);
        assert_eq!(classify_urgency(1), Urgency::Soon);
        assert_eq!(classify_urgency(7), Urgency::Soon);
        assert_eq!(classify_urgency(8), Urgency::Upcoming);
        assert_eq!(classify_urgency(30), Urgency::Upcoming);
        assert_eq!(classify_urgency(31), Urgency::NotDue);
    }

    #[test]
    fn scenario_no_history_due_soon() {
        let e = epi(1, Some(date(2023, 1, 15)), 12, 1);
        let days = days_until_next_check(&e, None, date(2024, 1, 10)).unwrap();
        assert_eq!(days, 5);
        assert_eq!(classify_urgency(days), Urgency::Soon);
    }

    #[test]
    fn due_list_sorts_by_days_then_id() {
        let epis = vec![
            epi(3, Some(date(2023, 12, 1)), 1, 1), // due 2024-01-01
            epi(1, Some(date(2023, 11, 20)), 1, 1), // due 2023-12-20, overdue
            epi(2, Some(date(2023, 12, 1)), 1, 1), // due 2024-01-01, same as 3
        ];
        let due = list_due_equipment(&epis, &HashMap::new(), date(2024, 1, 1));
        let ids: Vec<i32> = due.iter().map(|d| d.epi_id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(due[0].urgency, Urgency::Urgent);
        assert_eq!(due[1].days_until_next_check, 0);
        assert_eq!(due[2].days_until_next_check, 0);
    }

    #[test]
    fn due_list_excludes_non_operational_equipment() {
        // Both decommissioned units are a year overdue
        let epis = vec![
            epi(1, Some(date(2022, 1, 1)), 6, 3),
            epi(2, Some(date(2022, 1, 1)), 6, 2),
            epi(3, Some(date(2023, 12, 1)), 1, 1),
        ];
        let due = list_due_equipment(&epis, &HashMap::new(), date(2024, 1, 1));
        assert_eq!(due.len(), 1);
        assert_eq!(due[0].epi_id, 3);
    }

    #[test]
    fn due_list_excludes_equipment_not_due_within_a_month() {
        let epis = vec![epi(1, Some(date(2024, 1, 1)), 12, 1)];
        let due = list_due_equipment(&epis, &HashMap::new(), date(2024, 1, 10));
        assert!(due.is_empty());
    }

    #[test]
    fn due_list_uses_latest_check_as_baseline() {
        let epis = vec![epi(7, Some(date(2020, 1, 1)), 6, 1)];
        let mut checks = HashMap::new();
        checks.insert(7, vec![date(2023, 1, 10), date(2023, 6, 1), date(2022, 11, 3)]);
        let due = list_due_equipment(&epis, &checks, date(2023, 12, 15));
        assert_eq!(due.len(), 1);
        // baseline 2023-06-01 + 6 months = 2023-12-01
        assert_eq!(due[0].days_until_next_check, -14);
        assert_eq!(due[0].urgency, Urgency::Urgent);
    }

    #[test]
    fn malformed_record_is_skipped_not_fatal() {
        let epis = vec![
            epi(1, Some(date(2023, 12, 1)), 0, 1), // invalid periodicity
            epi(2, None, 6, 1),                    // missing service start
            epi(3, Some(date(2023, 12, 1)), 1, 1),
        ];
        let due = list_due_equipment(&epis, &HashMap::new(), date(2024, 1, 1));
        assert_eq!(due.len(), 1);
        assert_eq!(due[0].epi_id, 3);
    }

    #[test]
    fn due_list_is_idempotent() {
        let epis = vec![
            epi(1, Some(date(2023, 11, 20)), 1, 1),
            epi(2, Some(date(2023, 12, 1)), 1, 1),
        ];
        let checks = HashMap::new();
        let as_of = date(2024, 1, 1);
        let first = list_due_equipment(&epis, &checks, as_of);
        let second = list_due_equipment(&epis, &checks, as_of);
        assert_eq!(first.len(), second.len());
        for (a, b) in first.iter().zip(second.iter()) {
            assert_eq!(a.epi_id, b.epi_id);
            assert_eq!(a.days_until_next_check, b.days_until_next_check);
            assert_eq!(a.urgency, b.urgency);
        }
    }

    #[test]
    fn summary_counts_match_the_due_list() {
        let epis = vec![
            epi(1, Some(date(2023, 11, 1)), 1, 1),  // overdue
            epi(2, Some(date(2023, 12, 5)), 1, 1),  // 4 days
            epi(3, Some(date(2023, 12, 20)), 1, 1), // 19 days
            epi(4, Some(date(2024, 1, 1)), 12, 1),  // not due
        ];
        let due = list_due_equipment(&epis, &HashMap::new(), date(2024, 1, 1));
        let counts = summarize_due_counts(&due);

        let urgent = due.iter().filter(|d| d.urgency == Urgency::Urgent).count() as i64;
        let soon = due.iter().filter(|d| d.urgency == Urgency::Soon).count() as i64;
        let upcoming = due.iter().filter(|d| d.urgency == Urgency::Upcoming).count() as i64;
        assert_eq!(counts.urgent, urgent);
        assert_eq!(counts.soon, soon);
        assert_eq!(counts.upcoming, upcoming);
        assert_eq!(counts.total, due.len() as i64);
        assert_eq!(counts, DueCounts { total: 3, urgent: 1, soon: 1, upcoming: 1 });
    }

    #[test]
    fn history_fills_empty_months_with_zero() {
        let checks = vec![date(2024, 1, 5), date(2024, 1, 20), date(2024, 4, 2)];
        let history = summarize_inspection_history(&checks, 12, date(2024, 6, 15));
        assert_eq!(history.len(), 12);
        assert_eq!(history.first().unwrap().month, "2023-07");
        assert_eq!(history.last().unwrap().month, "2024-06");

        let march = history.iter().find(|h| h.month == "2024-03").unwrap();
        assert_eq!(march.count, 0);
        let january = history.iter().find(|h| h.month == "2024-01").unwrap();
        assert_eq!(january.count, 2);
    }

    #[test]
    fn history_ignores_checks_outside_the_window() {
        let checks = vec![date(2022, 1, 1), date(2024, 6, 1), date(2025, 1, 1)];
        let history = summarize_inspection_history(&checks, 12, date(2024, 6, 15));
        let total: i64 = history.iter().map(|h| h.count).sum();
        assert_eq!(total, 1);
    }

    #[test]
    fn history_is_chronologically_ascending() {
        let history = summarize_inspection_history(&[], 3, date(2024, 2, 10));
        let months: Vec<&str> = history.iter().map(|h| h.month.as_str()).collect();
        assert_eq!(months, vec!["2023-12", "2024-01", "2024-02"]);
    }
}
