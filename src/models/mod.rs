//! Data models for GestEPI

pub mod check;
pub mod enums;
pub mod epi;
pub mod lookup;
pub mod user;

// Re-export commonly used types
pub use check::{CreateEpiCheck, EpiCheck, EpiCheckDetails, UpdateEpiCheck};
pub use enums::{EpiStatusCode, UserRole};
pub use epi::{CreateEpi, Epi, UpdateEpi};
pub use lookup::{EpiStatus, EpiType};
pub use user::{User, UserClaims};
