//! Speed test route handler

use crate::{
    api::types::SpeedTestResult,
    error::{Error, Result},
    server::AppState,
};
use axum::{
    extract::{Path, State},
    Json,
};

/// Measure download and upload bandwidth
#[utoipa::path(
    get,
    path = "/api/network/test-speed/{interface_name}",
    params(
        ("interface_name" = String, Path, description = "Local interface name"),
    ),
    responses(
        (status = 200, description = "Averaged speeds", body = SpeedTestResult),
        (status = 400, description = "Unknown interface or no IPv4 address", body = crate::error::ErrorResponse),
        (status = 500, description = "Unexpected failure", body = crate::error::ErrorResponse),
    ),
    tag = "network",
)]
pub async fn test_speed(
    State(state): State<AppState>,
    Path(interface_name): Path<String>,
) -> Result<Json<SpeedTestResult>> {
    let tester = state.speed_tester.clone();
    let result = tokio::spawn(async move { tester.test_interface(&interface_name).await })
        .await
        .map_err(|e| Error::unexpected("testing speed", e))??;

    Ok(Json(result))
}
