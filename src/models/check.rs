//! Inspection record model

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// One completed inspection of an EPI
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct EpiCheck {
    pub id: i32,
    pub check_date: NaiveDate,
    /// Inspecting user
    pub user_id: i32,
    pub epi_id: i32,
    /// Status assigned to the equipment as of this inspection
    pub status_id: i16,
    pub remarks: Option<String>,
}

/// Inspection record joined with user, equipment and status names
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct EpiCheckDetails {
    pub id: i32,
    pub check_date: NaiveDate,
    pub user_id: i32,
    pub epi_id: i32,
    pub status_id: i16,
    pub remarks: Option<String>,
    /// Joined: "firstname lastname" of the inspecting user
    pub user_name: Option<String>,
    /// Joined: serial number of the inspected EPI
    pub epi_serial_number: Option<String>,
    /// Joined: name of the outcome status
    pub status_name: Option<String>,
}

/// Create inspection request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateEpiCheck {
    pub check_date: NaiveDate,
    pub user_id: i32,
    pub epi_id: i32,
    pub status_id: i16,
    #[validate(length(max = 1000, message = "Remarks must be at most 1000 characters"))]
    pub remarks: Option<String>,
}

/// Update inspection request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateEpiCheck {
    pub check_date: Option<NaiveDate>,
    pub user_id: Option<i32>,
    pub status_id: Option<i16>,
    #[validate(length(max = 1000, message = "Remarks must be at most 1000 characters"))]
    pub remarks: Option<String>,
}
