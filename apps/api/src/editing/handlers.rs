//! Axum route handlers for report sessions and section editing.

use axum::{
    extract::{Path, State},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::editing::session::{EditError, EditState, ReportSession};
use crate::errors::AppError;
use crate::report::{Report, SectionKind};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub report_id: Uuid,
    pub topic: String,
    pub report: Report,
    pub edit: EditState,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&ReportSession> for SessionResponse {
    fn from(session: &ReportSession) -> Self {
        Self {
            report_id: session.id,
            topic: session.topic.clone(),
            report: session.report().clone(),
            edit: session.edit_state().clone(),
            created_at: session.created_at,
            updated_at: session.updated_at,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct BeginEditRequest {
    pub section: SectionKind,
}

#[derive(Debug, Deserialize)]
pub struct ChangeDraftRequest {
    pub draft: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// Applies one transition to a session and returns its new state.
async fn transition(
    state: &AppState,
    report_id: Uuid,
    f: impl FnOnce(&mut ReportSession) -> Result<(), EditError>,
) -> Result<Json<SessionResponse>, AppError> {
    let response = state
        .sessions
        .update(report_id, |session| {
            f(session).map(|()| SessionResponse::from(&*session))
        })
        .await
        .ok_or_else(|| AppError::NotFound(format!("Report {report_id} not found")))??;
    Ok(Json(response))
}

/// GET /api/v1/reports/:id
pub async fn handle_get_report(
    State(state): State<AppState>,
    Path(report_id): Path<Uuid>,
) -> Result<Json<SessionResponse>, AppError> {
    let session = state
        .sessions
        .get(report_id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("Report {report_id} not found")))?;
    Ok(Json(SessionResponse::from(&session)))
}

/// POST /api/v1/reports/:id/edit
pub async fn handle_begin_edit(
    State(state): State<AppState>,
    Path(report_id): Path<Uuid>,
    Json(request): Json<BeginEditRequest>,
) -> Result<Json<SessionResponse>, AppError> {
    transition(&state, report_id, |s| s.begin_edit(request.section)).await
}

/// PUT /api/v1/reports/:id/edit
pub async fn handle_change_draft(
    State(state): State<AppState>,
    Path(report_id): Path<Uuid>,
    Json(request): Json<ChangeDraftRequest>,
) -> Result<Json<SessionResponse>, AppError> {
    transition(&state, report_id, |s| s.change_draft(request.draft)).await
}

/// POST /api/v1/reports/:id/edit/commit
///
/// An empty draft is refused with 422 and the section stays open.
pub async fn handle_commit(
    State(state): State<AppState>,
    Path(report_id): Path<Uuid>,
) -> Result<Json<SessionResponse>, AppError> {
    transition(&state, report_id, |s| s.commit().map(|_| ())).await
}

/// POST /api/v1/reports/:id/edit/cancel
pub async fn handle_cancel(
    State(state): State<AppState>,
    Path(report_id): Path<Uuid>,
) -> Result<Json<SessionResponse>, AppError> {
    transition(&state, report_id, |s| {
        s.cancel();
        Ok(())
    })
    .await
}
