//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{clients, daily_reports, health, status_types};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "LeadFlow API",
        version = "1.0.0",
        description = "Sales CRM Backend REST API",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    servers(
        (url = "/api", description = "API root")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Client status types
        status_types::list_client_status_types,
        status_types::get_client_status_type,
        status_types::create_client_status_type,
        status_types::update_client_status_type,
        status_types::delete_client_status_type,
        // Action status types
        status_types::list_action_status_types,
        status_types::get_action_status_type,
        status_types::create_action_status_type,
        status_types::update_action_status_type,
        status_types::delete_action_status_type,
        // Clients
        clients::list_clients,
        clients::get_client_statistics,
        clients::get_client_summary,
        clients::get_client,
        clients::create_client,
        clients::update_client,
        clients::update_client_comment,
        clients::delete_client,
        // Daily reports
        daily_reports::list_daily_reports,
        daily_reports::get_daily_report,
        daily_reports::create_daily_report,
        daily_reports::update_daily_report,
        daily_reports::delete_daily_report,
    ),
    components(
        schemas(
            // Status types
            crate::models::status_type::ClientStatusType,
            crate::models::status_type::CreateClientStatusType,
            crate::models::status_type::ActionStatusType,
            crate::models::status_type::CreateActionStatusType,
            // Clients
            crate::models::client::Client,
            crate::models::client::CreateClient,
            crate::models::client::UpdateClient,
            crate::models::client::ActionStatus,
            crate::models::client::ClientStatistics,
            crate::models::client::ClientSummary,
            clients::UpdateComment,
            // Daily reports
            crate::models::daily_report::DailyReport,
            crate::models::daily_report::CreateDailyReport,
            crate::models::daily_report::UpdateDailyReport,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "status-types", description = "Pipeline and action status labels"),
        (name = "clients", description = "Client management and aggregates"),
        (name = "daily-reports", description = "Daily activity reports")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
