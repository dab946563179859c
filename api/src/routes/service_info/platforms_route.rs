use axum::Json;
use serde::Serialize;
use startup_analyst::Platform;

#[derive(Debug, Serialize)]
pub struct PlatformEntry {
    pub id: &'static str,
    pub label: &'static str,
}

/// Handler: GET /platforms
pub async fn platforms_route() -> Json<Vec<PlatformEntry>> {
    Json(
        Platform::ALL
            .into_iter()
            .map(|p| PlatformEntry {
                id: p.id(),
                label: p.label(),
            })
            .collect(),
    )
}
