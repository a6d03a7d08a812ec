//! Axum route handlers for the Generation API.

use axum::{extract::State, Json};
use serde::Deserialize;
use tracing::{info, warn};

use crate::editing::handlers::SessionResponse;
use crate::editing::session::ReportSession;
use crate::errors::AppError;
use crate::generation::generator::{generate_report, GenerationRequest};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct GenerateReportRequest {
    pub topic: String,
}

/// POST /api/v1/reports
///
/// Generates a report for the topic and opens a session over it. The topic is recorded in
/// history only when generation succeeds.
pub async fn handle_generate(
    State(state): State<AppState>,
    Json(request): Json<GenerateReportRequest>,
) -> Result<Json<SessionResponse>, AppError> {
    let request = GenerationRequest::new(request.topic.trim())?;

    let report = generate_report(state.backend.as_ref(), &request).await?;

    let session = ReportSession::new(request.topic().to_string(), report);
    let response = SessionResponse::from(&session);
    let report_id = state.sessions.insert(session).await;
    info!(
        "Opened report session {report_id} ({} open)",
        state.sessions.len().await
    );

    // The report exists regardless; a history hiccup should not discard it.
    if let Err(e) = state.history.append(request.topic()).await {
        warn!("Could not record {:?} in history: {}", request.topic(), e);
    }

    Ok(Json(response))
}
