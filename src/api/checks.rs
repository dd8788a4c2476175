//! Inspection endpoints: history CRUD and the due worklist

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    api::AuthenticatedUser,
    error::AppResult,
    models::check::{CreateEpiCheck, EpiCheck, EpiCheckDetails, UpdateEpiCheck},
    models::epi::Epi,
    schedule::Urgency,
    AppState,
};

/// One line of the due worklist
#[derive(Serialize, ToSchema)]
pub struct DueEpiEntry {
    #[serde(flatten)]
    pub epi: Epi,
    /// Days remaining until the next inspection is due (negative when overdue)
    pub days_until_next_check: i64,
    pub urgency: Urgency,
}

/// List all inspections
#[utoipa::path(
    get,
    path = "/checks",
    tag = "checks",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "List of inspections", body = Vec<EpiCheckDetails>)
    )
)]
pub async fn list_checks(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
) -> AppResult<Json<Vec<EpiCheckDetails>>> {
    let checks = state.services.checks.list().await?;
    Ok(Json(checks))
}

/// Equipment due for inspection within 30 days, most overdue first
#[utoipa::path(
    get,
    path = "/checks/due",
    tag = "checks",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Due worklist", body = Vec<DueEpiEntry>)
    )
)]
pub async fn due_checks(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
) -> AppResult<Json<Vec<DueEpiEntry>>> {
    let as_of = Utc::now().date_naive();
    let due = state.services.checks.due_list(as_of).await?;
    Ok(Json(due))
}

/// Get one inspection by id
#[utoipa::path(
    get,
    path = "/checks/{id}",
    tag = "checks",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Inspection id")
    ),
    responses(
        (status = 200, description = "Inspection found", body = EpiCheckDetails),
        (status = 404, description = "Inspection not found")
    )
)]
pub async fn get_check(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<EpiCheckDetails>> {
    let check = state.services.checks.get_by_id(id).await?;
    Ok(Json(check))
}

/// List the inspection history of one piece of equipment
#[utoipa::path(
    get,
    path = "/epis/{id}/checks",
    tag = "checks",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Equipment id")
    ),
    responses(
        (status = 200, description = "Inspection history", body = Vec<EpiCheckDetails>),
        (status = 404, description = "Equipment not found")
    )
)]
pub async fn list_checks_by_epi(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<Vec<EpiCheckDetails>>> {
    let checks = state.services.checks.list_by_epi(id).await?;
    Ok(Json(checks))
}

/// Record a new inspection
#[utoipa::path(
    post,
    path = "/checks",
    tag = "checks",
    security(("bearer_auth" = [])),
    request_body = CreateEpiCheck,
    responses(
        (status = 201, description = "Inspection recorded", body = EpiCheck),
        (status = 400, description = "Invalid data"),
        (status = 404, description = "Equipment, user or status not found")
    )
)]
pub async fn create_check(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(data): Json<CreateEpiCheck>,
) -> AppResult<(StatusCode, Json<EpiCheck>)> {
    claims.require_inspector()?;
    let check = state.services.checks.create(&data).await?;
    Ok((StatusCode::CREATED, Json(check)))
}

/// Update an inspection record
#[utoipa::path(
    put,
    path = "/checks/{id}",
    tag = "checks",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Inspection id")
    ),
    request_body = UpdateEpiCheck,
    responses(
        (status = 200, description = "Inspection updated", body = EpiCheck),
        (status = 404, description = "Inspection not found")
    )
)]
pub async fn update_check(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(data): Json<UpdateEpiCheck>,
) -> AppResult<Json<EpiCheck>> {
    claims.require_inspector()?;
    let check = state.services.checks.update(id, &data).await?;
    Ok(Json(check))
}

/// Delete an inspection record
#[utoipa::path(
    delete,
    path = "/checks/{id}",
    tag = "checks",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Inspection id")
    ),
    responses(
        (status = 204, description = "Inspection deleted"),
        (status = 404, description = "Inspection not found")
    )
)]
pub async fn delete_check(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    claims.require_inspector()?;
    state.services.checks.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
