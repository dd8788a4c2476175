//! Reference data endpoints: equipment types and statuses

use axum::{
    extract::{Path, State},
    Json,
};

use crate::{
    api::AuthenticatedUser,
    error::AppResult,
    models::lookup::{EpiStatus, EpiType},
    AppState,
};

/// List equipment types
#[utoipa::path(
    get,
    path = "/epi-types",
    tag = "lookups",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "List of equipment types", body = Vec<EpiType>)
    )
)]
pub async fn list_epi_types(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
) -> AppResult<Json<Vec<EpiType>>> {
    let types = state.services.epis.list_types().await?;
    Ok(Json(types))
}

/// Get one equipment type by id
#[utoipa::path(
    get,
    path = "/epi-types/{id}",
    tag = "lookups",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Equipment type id")
    ),
    responses(
        (status = 200, description = "Equipment type found", body = EpiType),
        (status = 404, description = "Equipment type not found")
    )
)]
pub async fn get_epi_type(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<EpiType>> {
    let epi_type = state.services.epis.get_type_by_id(id).await?;
    Ok(Json(epi_type))
}

/// List equipment statuses
#[utoipa::path(
    get,
    path = "/epi-statuses",
    tag = "lookups",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "List of equipment statuses", body = Vec<EpiStatus>)
    )
)]
pub async fn list_epi_statuses(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
) -> AppResult<Json<Vec<EpiStatus>>> {
    let statuses = state.services.epis.list_statuses().await?;
    Ok(Json(statuses))
}

/// Get one equipment status by id
#[utoipa::path(
    get,
    path = "/epi-statuses/{id}",
    tag = "lookups",
    security(("bearer_auth" = [])),
    params(
        ("id" = i16, Path, description = "Equipment status id")
    ),
    responses(
        (status = 200, description = "Equipment status found", body = EpiStatus),
        (status = 404, description = "Equipment status not found")
    )
)]
pub async fn get_epi_status(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<i16>,
) -> AppResult<Json<EpiStatus>> {
    let status = state.services.epis.get_status_by_id(id).await?;
    Ok(Json(status))
}
