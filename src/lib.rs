//! GestEPI - Personal Protective Equipment Inspection Tracking
//!
//! A Rust implementation of the GestEPI backend, providing a REST JSON API
//! for managing PPE inventory, recording inspections and computing the
//! inspection due worklist.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod schedule;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}
