//! Reference tables: EPI types and statuses

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// EPI type (harness, rope, helmet, ...)
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct EpiType {
    pub id: i32,
    pub type_name: String,
    /// Textile equipment ages differently and may carry a shorter lifetime
    pub is_textile: bool,
}

/// EPI status (in service, needs repair, decommissioned)
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct EpiStatus {
    pub id: i16,
    pub status_name: String,
}
