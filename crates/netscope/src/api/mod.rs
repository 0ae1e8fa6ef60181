//! HTTP surface of the netscope service

pub mod middleware;
pub mod routes;
pub mod types;

use crate::server::AppState;
use axum::{routing::get, Router};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Create the network and health routes
pub fn routes(state: AppState) -> Router {
    let network = Router::new()
        .route("/test", get(routes::interfaces::interface_overview))
        .route("/interfaces", get(routes::interfaces::list_interfaces))
        .route("/analyze-url", get(routes::url::analyze_url))
        .route(
            "/test-speed/:interface_name",
            get(routes::speed::test_speed),
        );

    let router = Router::new()
        .nest("/api/network", network)
        .route("/health", get(routes::health::health_check))
        .with_state(state.clone());

    middleware::apply_middleware(router, &state.config)
}

/// Create OpenAPI documentation routes
pub fn docs_routes() -> Router {
    Router::new().merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        routes::interfaces::interface_overview,
        routes::interfaces::list_interfaces,
        routes::url::analyze_url,
        routes::speed::test_speed,
        routes::health::health_check,
    ),
    components(schemas(
        types::NetworkInterfaceInfo,
        types::InterfaceSummary,
        types::InterfaceOverview,
        types::QueryParameter,
        types::UrlAnalysisResult,
        types::SpeedTestResult,
        types::HealthCheckResponse,
        crate::network::OperationalStatus,
        crate::network::InterfaceKind,
        crate::error::ErrorResponse,
        crate::error::ErrorDetails,
    )),
    tags(
        (name = "network", description = "Interface inspection, URL analysis and speed tests"),
        (name = "health", description = "Health and monitoring"),
    ),
    info(
        title = "Netscope API",
        version = "1.0.0",
        description = "Local network diagnostics over HTTP",
        license(
            name = "MIT",
        ),
    ),
    servers(
        (url = "http://localhost:5000", description = "Local development"),
    ),
)]
pub struct ApiDoc;
