//! Barcode scan log endpoint

use api_types::scan::{ScanNew, ScanSaved};
use axum::{Json, extract::State};
use chrono::Utc;

use crate::{ServerError, server::ServerState};

/// Append one scanned barcode.
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<ScanNew>,
) -> Result<Json<ScanSaved>, ServerError> {
    let id = state
        .store
        .record_scan(&payload.kind, &payload.data, Utc::now())
        .await?;
    Ok(Json(ScanSaved { id }))
}
