//! EPI (personal protective equipment) model

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// EPI record, joined with its type and status names
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Epi {
    pub id: i32,
    pub brand: String,
    pub model: String,
    /// Manufacturer serial number (unique)
    pub serial_number: String,
    pub size: Option<String>,
    pub color: Option<String>,
    pub purchase_date: Option<NaiveDate>,
    pub manufacture_date: Option<NaiveDate>,
    /// Date the equipment entered service; anchor for the first inspection
    pub service_start_date: Option<NaiveDate>,
    /// Months between mandatory inspections (must be > 0)
    pub periodicity: i32,
    pub epi_type_id: i32,
    /// Status (1=in service, 2=needs repair, 3=decommissioned)
    pub status_id: i16,
    pub end_of_life_date: Option<NaiveDate>,
    /// Joined from epi_types
    pub type_name: Option<String>,
    /// Joined from epi_statuses
    pub status_name: Option<String>,
}

/// Create EPI request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateEpi {
    #[validate(length(min = 1, message = "Brand is required"))]
    pub brand: String,
    #[validate(length(min = 1, message = "Model is required"))]
    pub model: String,
    #[validate(length(min = 1, message = "Serial number is required"))]
    pub serial_number: String,
    pub size: Option<String>,
    pub color: Option<String>,
    pub purchase_date: Option<NaiveDate>,
    pub manufacture_date: Option<NaiveDate>,
    pub service_start_date: NaiveDate,
    #[validate(range(min = 1, message = "Periodicity must be at least 1 month"))]
    pub periodicity: i32,
    pub epi_type_id: i32,
    pub status_id: i16,
    pub end_of_life_date: Option<NaiveDate>,
}

/// Update EPI request (all fields optional)
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateEpi {
    pub brand: Option<String>,
    pub model: Option<String>,
    pub serial_number: Option<String>,
    pub size: Option<String>,
    pub color: Option<String>,
    pub purchase_date: Option<NaiveDate>,
    pub manufacture_date: Option<NaiveDate>,
    pub service_start_date: Option<NaiveDate>,
    #[validate(range(min = 1, message = "Periodicity must be at least 1 month"))]
    pub periodicity: Option<i32>,
    pub epi_type_id: Option<i32>,
    pub status_id: Option<i16>,
    pub end_of_life_date: Option<NaiveDate>,
}
