//! Interface listing route handlers

use crate::{
    api::types::{InterfaceOverview, NetworkInterfaceInfo},
    error::{Error, Result},
    server::AppState,
};
use axum::{extract::State, Json};
use tracing::debug;

/// List interfaces that are up and have an IPv4 address
#[utoipa::path(
    get,
    path = "/api/network/interfaces",
    responses(
        (status = 200, description = "Usable interfaces", body = [NetworkInterfaceInfo]),
        (status = 500, description = "Interface enumeration failed", body = crate::error::ErrorResponse),
    ),
    tag = "network",
)]
pub async fn list_interfaces(
    State(state): State<AppState>,
) -> Result<Json<Vec<NetworkInterfaceInfo>>> {
    let enumerator = state.enumerator.clone();
    let interfaces = tokio::task::spawn_blocking(move || enumerator.list_interfaces())
        .await
        .map_err(|e| Error::unexpected("listing interfaces", e))?
        .map_err(|e| Error::unexpected("listing interfaces", e))?;

    debug!("Returning {} interfaces", interfaces.len());
    Ok(Json(interfaces))
}

/// Every interface with its up and IPv4 flags
#[utoipa::path(
    get,
    path = "/api/network/test",
    responses(
        (status = 200, description = "All interfaces known to the OS", body = InterfaceOverview),
        (status = 500, description = "Interface enumeration failed", body = crate::error::ErrorResponse),
    ),
    tag = "network",
)]
pub async fn interface_overview(State(state): State<AppState>) -> Result<Json<InterfaceOverview>> {
    let enumerator = state.enumerator.clone();
    let overview = tokio::task::spawn_blocking(move || enumerator.overview())
        .await
        .map_err(|e| Error::unexpected("inspecting interfaces", e))?
        .map_err(|e| Error::unexpected("inspecting interfaces", e))?;

    Ok(Json(overview))
}
