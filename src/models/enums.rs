//! Shared domain enums (codes stored as foreign keys in the database)

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// ---------------------------------------------------------------------------
// EpiStatusCode
// ---------------------------------------------------------------------------

/// Equipment status codes (rows of the `epi_statuses` table).
///
/// Only `InService` equipment participates in inspection scheduling;
/// equipment flagged for repair or decommissioned is excluded from due
/// lists regardless of its dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[repr(i16)]
pub enum EpiStatusCode {
    Unknown = 0,
    InService = 1,
    NeedsRepair = 2,
    Decommissioned = 3,
}

impl From<i16> for EpiStatusCode {
    fn from(v: i16) -> Self {
        match v {
            1 => EpiStatusCode::InService,
            2 => EpiStatusCode::NeedsRepair,
            3 => EpiStatusCode::Decommissioned,
            _ => EpiStatusCode::Unknown,
        }
    }
}

impl From<EpiStatusCode> for i16 {
    fn from(s: EpiStatusCode) -> Self {
        s as i16
    }
}

impl std::fmt::Display for EpiStatusCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            EpiStatusCode::Unknown => "Unknown",
            EpiStatusCode::InService => "In service",
            EpiStatusCode::NeedsRepair => "Needs repair",
            EpiStatusCode::Decommissioned => "Decommissioned",
        };
        write!(f, "{}", label)
    }
}

// ---------------------------------------------------------------------------
// UserRole
// ---------------------------------------------------------------------------

/// User role codes (rows of the `user_types` table)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[repr(i16)]
pub enum UserRole {
    Unknown = 0,
    Admin = 1,
    Inspector = 2,
    User = 3,
}

impl From<i16> for UserRole {
    fn from(v: i16) -> Self {
        match v {
            1 => UserRole::Admin,
            2 => UserRole::Inspector,
            3 => UserRole::User,
            _ => UserRole::Unknown,
        }
    }
}

impl From<UserRole> for i16 {
    fn from(r: UserRole) -> Self {
        r as i16
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            UserRole::Unknown => "Unknown",
            UserRole::Admin => "Administrator",
            UserRole::Inspector => "Inspector",
            UserRole::User => "User",
        };
        write!(f, "{}", label)
    }
}
