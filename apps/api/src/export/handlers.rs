//! Axum route handlers for layout preview and PDF export.

use axum::{
    extract::{Path, State},
    http::{header, HeaderValue},
    response::{IntoResponse, Response},
    Json,
};
use bytes::Bytes;
use uuid::Uuid;

use crate::errors::AppError;
use crate::export::pdf::PdfDocumentWriter;
use crate::export::writer::{export_filename, write_document, ExportError};
use crate::layout::{layout_report, PageLayoutPlan};
use crate::state::AppState;

async fn plan_for(state: &AppState, report_id: Uuid) -> Result<(String, PageLayoutPlan), AppError> {
    let session = state
        .sessions
        .get(report_id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("Report {report_id} not found")))?;

    // Committed text only; an open draft is not part of the report yet.
    let plan = layout_report(
        &session.topic,
        session.report(),
        &state.config.page_geometry,
        &state.typography,
    )?;
    Ok((session.topic, plan))
}

/// GET /api/v1/reports/:id/layout
///
/// Returns the page-by-page render plan the PDF export would draw.
pub async fn handle_layout(
    State(state): State<AppState>,
    Path(report_id): Path<Uuid>,
) -> Result<Json<PageLayoutPlan>, AppError> {
    let (_, plan) = plan_for(&state, report_id).await?;
    Ok(Json(plan))
}

/// GET /api/v1/reports/:id/export
///
/// Renders the committed report to PDF and returns it as an attachment.
pub async fn handle_export(
    State(state): State<AppState>,
    Path(report_id): Path<Uuid>,
) -> Result<Response, AppError> {
    let (topic, plan) = plan_for(&state, report_id).await?;
    let filename = export_filename(&state.config.product_name, &topic);

    let mut writer = PdfDocumentWriter::in_memory(plan.geometry, state.typography);
    write_document(&plan, &mut writer, &filename)?;
    let (filename, bytes) = writer
        .take_saved()
        .ok_or_else(|| ExportError::ExportFailed("writer produced no document".to_string()))?;

    Ok((
        [
            (header::CONTENT_TYPE, HeaderValue::from_static("application/pdf")),
            (header::CONTENT_DISPOSITION, content_disposition(&filename)),
        ],
        Bytes::from(bytes),
    )
        .into_response())
}

/// `attachment; filename="..."` restricted to header-safe ASCII.
fn content_disposition(filename: &str) -> HeaderValue {
    let safe: String = filename
        .chars()
        .map(|c| {
            if c.is_ascii_graphic() && c != '"' && c != '\\' {
                c
            } else {
                '_'
            }
        })
        .collect();
    HeaderValue::from_str(&format!("attachment; filename=\"{safe}\""))
        .unwrap_or_else(|_| HeaderValue::from_static("attachment"))
}
