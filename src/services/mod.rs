//! Business logic services

pub mod checks;
pub mod dashboard;
pub mod epis;
pub mod users;

use crate::{config::AuthConfig, repository::Repository};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub epis: epis::EpisService,
    pub checks: checks::ChecksService,
    pub users: users::UsersService,
    pub dashboard: dashboard::DashboardService,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository, auth_config: AuthConfig) -> Self {
        Self {
            epis: epis::EpisService::new(repository.clone()),
            checks: checks::ChecksService::new(repository.clone()),
            users: users::UsersService::new(repository.clone(), auth_config),
            dashboard: dashboard::DashboardService::new(repository),
        }
    }
}
