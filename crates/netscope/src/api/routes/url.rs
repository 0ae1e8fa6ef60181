//! URL analysis route handler

use crate::{
    api::types::{AnalyzeUrlQuery, UrlAnalysisResult},
    error::{Error, Result},
    server::AppState,
};
use axum::{
    extract::{Query, State},
    Json,
};

/// Parse a URL and probe its host
///
/// A URL that fails to parse is still a 200 with `isValid: false`.
#[utoipa::path(
    get,
    path = "/api/network/analyze-url",
    params(AnalyzeUrlQuery),
    responses(
        (status = 200, description = "Analysis result", body = UrlAnalysisResult),
        (status = 400, description = "Missing or empty URL", body = crate::error::ErrorResponse),
        (status = 500, description = "Unexpected failure", body = crate::error::ErrorResponse),
    ),
    tag = "network",
)]
pub async fn analyze_url(
    State(state): State<AppState>,
    Query(query): Query<AnalyzeUrlQuery>,
) -> Result<Json<UrlAnalysisResult>> {
    let url = match query.url {
        Some(url) if !url.trim().is_empty() => url,
        _ => {
            return Err(Error::InvalidRequest {
                message: "URL must not be empty".to_string(),
            })
        }
    };

    let analyzer = state.analyzer.clone();
    let result = tokio::spawn(async move { analyzer.analyze(&url).await })
        .await
        .map_err(|e| Error::unexpected("analyzing URL", e))?;

    Ok(Json(result))
}
