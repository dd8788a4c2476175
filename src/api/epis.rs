//! Equipment (EPI) endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    api::AuthenticatedUser,
    error::AppResult,
    models::epi::{CreateEpi, Epi, UpdateEpi},
    AppState,
};

/// List all equipment
#[utoipa::path(
    get,
    path = "/epis",
    tag = "epis",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "List of equipment", body = Vec<Epi>)
    )
)]
pub async fn list_epis(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
) -> AppResult<Json<Vec<Epi>>> {
    let epis = state.services.epis.list().await?;
    Ok(Json(epis))
}

/// Get one piece of equipment by id
#[utoipa::path(
    get,
    path = "/epis/{id}",
    tag = "epis",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Equipment id")
    ),
    responses(
        (status = 200, description = "Equipment found", body = Epi),
        (status = 404, description = "Equipment not found")
    )
)]
pub async fn get_epi(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<Epi>> {
    let epi = state.services.epis.get_by_id(id).await?;
    Ok(Json(epi))
}

/// Register a new piece of equipment
#[utoipa::path(
    post,
    path = "/epis",
    tag = "epis",
    security(("bearer_auth" = [])),
    request_body = CreateEpi,
    responses(
        (status = 201, description = "Equipment created", body = Epi),
        (status = 400, description = "Invalid data"),
        (status = 409, description = "Serial number already registered")
    )
)]
pub async fn create_epi(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(data): Json<CreateEpi>,
) -> AppResult<(StatusCode, Json<Epi>)> {
    claims.require_admin()?;
    let epi = state.services.epis.create(&data).await?;
    Ok((StatusCode::CREATED, Json(epi)))
}

/// Update a piece of equipment
#[utoipa::path(
    put,
    path = "/epis/{id}",
    tag = "epis",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Equipment id")
    ),
    request_body = UpdateEpi,
    responses(
        (status = 200, description = "Equipment updated", body = Epi),
        (status = 404, description = "Equipment not found")
    )
)]
pub async fn update_epi(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(data): Json<UpdateEpi>,
) -> AppResult<Json<Epi>> {
    claims.require_admin()?;
    let epi = state.services.epis.update(id, &data).await?;
    Ok(Json(epi))
}

/// Delete a piece of equipment
#[utoipa::path(
    delete,
    path = "/epis/{id}",
    tag = "epis",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Equipment id")
    ),
    responses(
        (status = 204, description = "Equipment deleted"),
        (status = 404, description = "Equipment not found")
    )
)]
pub async fn delete_epi(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    claims.require_admin()?;
    state.services.epis.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
