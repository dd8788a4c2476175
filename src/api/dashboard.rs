//! Dashboard endpoint

use axum::{extract::State, Json};
use chrono::Utc;
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    api::AuthenticatedUser,
    error::AppResult,
    schedule::{DueCounts, MonthlyCheckCount},
    AppState,
};

/// A labelled count for a dashboard breakdown
#[derive(Serialize, ToSchema)]
pub struct StatEntry {
    pub label: String,
    pub value: i64,
}

#[derive(Serialize, ToSchema)]
pub struct DashboardResponse {
    /// Total number of registered equipment
    pub epi_count: i64,
    /// Equipment counts per type
    pub by_type: Vec<StatEntry>,
    /// Equipment counts per status
    pub by_status: Vec<StatEntry>,
    /// Urgency breakdown of the current due worklist
    pub pending_checks: DueCounts,
    /// Inspections recorded per month over the trailing year
    pub checks_history: Vec<MonthlyCheckCount>,
}

/// Aggregated dashboard view
#[utoipa::path(
    get,
    path = "/dashboard",
    tag = "dashboard",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Dashboard data", body = DashboardResponse)
    )
)]
pub async fn get_dashboard(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
) -> AppResult<Json<DashboardResponse>> {
    let as_of = Utc::now().date_naive();
    let dashboard = state.services.dashboard.get_dashboard(as_of).await?;
    Ok(Json(dashboard))
}
