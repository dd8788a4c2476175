//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{auth, checks, dashboard, epis, health, lookups, users};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "GestEPI API",
        version = "1.0.0",
        description = "Personal protective equipment inspection tracking REST API",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html"),
        contact(name = "GestEPI Team")
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Auth
        auth::login,
        auth::me,
        // EPIs
        epis::list_epis,
        epis::get_epi,
        epis::create_epi,
        epis::update_epi,
        epis::delete_epi,
        // Checks
        checks::list_checks,
        checks::due_checks,
        checks::get_check,
        checks::list_checks_by_epi,
        checks::create_check,
        checks::update_check,
        checks::delete_check,
        // Users
        users::list_users,
        users::get_user,
        users::create_user,
        users::update_user,
        users::delete_user,
        // Lookups
        lookups::list_epi_types,
        lookups::get_epi_type,
        lookups::list_epi_statuses,
        lookups::get_epi_status,
        // Dashboard
        dashboard::get_dashboard,
    ),
    components(
        schemas(
            // Auth
            auth::LoginRequest,
            auth::LoginResponse,
            // EPIs
            crate::models::epi::Epi,
            crate::models::epi::CreateEpi,
            crate::models::epi::UpdateEpi,
            // Checks
            crate::models::check::EpiCheck,
            crate::models::check::EpiCheckDetails,
            crate::models::check::CreateEpiCheck,
            crate::models::check::UpdateEpiCheck,
            checks::DueEpiEntry,
            // Users
            crate::models::user::User,
            crate::models::user::CreateUser,
            crate::models::user::UpdateUser,
            // Lookups
            crate::models::lookup::EpiType,
            crate::models::lookup::EpiStatus,
            // Schedule
            crate::schedule::Urgency,
            crate::schedule::DueCounts,
            crate::schedule::MonthlyCheckCount,
            // Dashboard
            dashboard::StatEntry,
            dashboard::DashboardResponse,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "auth", description = "Authentication endpoints"),
        (name = "epis", description = "Equipment inventory management"),
        (name = "checks", description = "Inspection records and due worklist"),
        (name = "users", description = "User management"),
        (name = "lookups", description = "Equipment types and statuses"),
        (name = "dashboard", description = "Aggregated dashboard")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
