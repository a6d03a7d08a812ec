//! Report session: the single authoritative report plus its edit state machine.
//!
//! States: `Viewing` and `Editing { section, draft }`. Only `commit` replaces the report,
//! and it only ever swaps one section for non-empty text, so the session always holds a
//! valid report. At most one section is open at a time.

use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info};
use uuid::Uuid;

use crate::report::{Report, SectionKind};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
    #[error("Edit of '{}' rejected: section text cannot be empty", .0.key())]
    EmptyEditRejected(SectionKind),

    #[error("No section is being edited")]
    NotEditing,

    #[error("Section '{}' is already being edited; commit or cancel it first", .open.key())]
    EditInProgress { open: SectionKind },
}

/// Edit state of a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum EditState {
    Viewing,
    Editing { section: SectionKind, draft: String },
}

#[derive(Debug, Clone, Serialize)]
pub struct ReportSession {
    pub id: Uuid,
    pub topic: String,
    report: Report,
    edit: EditState,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ReportSession {
    /// Opens a session in `Viewing` over a freshly generated report.
    pub fn new(topic: String, report: Report) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            topic,
            report,
            edit: EditState::Viewing,
            created_at: now,
            updated_at: now,
        }
    }

    /// The committed report. Drafts are never visible here.
    pub fn report(&self) -> &Report {
        &self.report
    }

    pub fn edit_state(&self) -> &EditState {
        &self.edit
    }

    /// `Viewing -> Editing(section, committed text)`.
    ///
    /// Re-opening the section already under edit keeps its draft; opening a different one
    /// while an edit is open is refused.
    pub fn begin_edit(&mut self, section: SectionKind) -> Result<(), EditError> {
        match &self.edit {
            EditState::Editing { section: open, .. } if *open == section => Ok(()),
            EditState::Editing { section: open, .. } => {
                Err(EditError::EditInProgress { open: *open })
            }
            EditState::Viewing => {
                self.edit = EditState::Editing {
                    section,
                    draft: self.report.section(section).to_string(),
                };
                debug!("Session {} editing '{}'", self.id, section.key());
                Ok(())
            }
        }
    }

    /// Replaces the draft of the open section.
    pub fn change_draft(&mut self, text: String) -> Result<(), EditError> {
        match &mut self.edit {
            EditState::Editing { draft, .. } => {
                *draft = text;
                Ok(())
            }
            EditState::Viewing => Err(EditError::NotEditing),
        }
    }

    /// `Editing -> Viewing`, writing the draft into the report.
    ///
    /// An empty draft is rejected and the session stays in `Editing`.
    pub fn commit(&mut self) -> Result<&Report, EditError> {
        let EditState::Editing { section, draft } = &self.edit else {
            return Err(EditError::NotEditing);
        };
        let section = *section;
        let updated = self
            .report
            .with_section(section, draft.clone())
            .map_err(|_| EditError::EmptyEditRejected(section))?;

        self.report = updated;
        self.edit = EditState::Viewing;
        self.updated_at = Utc::now();
        info!("Session {} committed edit of '{}'", self.id, section.key());
        Ok(&self.report)
    }

    /// `Editing -> Viewing`, discarding the draft. Cancelling while viewing is a no-op.
    pub fn cancel(&mut self) {
        if let EditState::Editing { section, .. } = &self.edit {
            debug!("Session {} discarded edit of '{}'", self.id, section.key());
        }
        self.edit = EditState::Viewing;
    }
}
