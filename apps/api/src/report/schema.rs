//! Report schema — the six fixed sections and the validation gate every report passes.
//!
//! A `Report` is an enum-indexed record: one text field per `SectionKind`, always all six.
//! The only way to build one from untrusted input is `validate` (also wired into serde
//! deserialization), so a partially populated report cannot exist.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

// ────────────────────────────────────────────────────────────────────────────
// Sections
// ────────────────────────────────────────────────────────────────────────────

/// One of the six sections of a report, in canonical order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SectionKind {
    Introduction,
    History,
    Benefits,
    Challenges,
    CurrentTrends,
    FutureScope,
}

impl SectionKind {
    /// Canonical section order. Layout, validation and display all iterate this.
    pub const ALL: [SectionKind; 6] = [
        SectionKind::Introduction,
        SectionKind::History,
        SectionKind::Benefits,
        SectionKind::Challenges,
        SectionKind::CurrentTrends,
        SectionKind::FutureScope,
    ];

    /// Wire key used by the generation backend and the HTTP API.
    pub fn key(self) -> &'static str {
        match self {
            SectionKind::Introduction => "introduction",
            SectionKind::History => "history",
            SectionKind::Benefits => "benefits",
            SectionKind::Challenges => "challenges",
            SectionKind::CurrentTrends => "currentTrends",
            SectionKind::FutureScope => "futureScope",
        }
    }

    /// Human-readable heading used in exports.
    pub fn title(self) -> &'static str {
        match self {
            SectionKind::Introduction => "Introduction",
            SectionKind::History => "History",
            SectionKind::Benefits => "Benefits",
            SectionKind::Challenges => "Challenges",
            SectionKind::CurrentTrends => "Current Trends",
            SectionKind::FutureScope => "Future Scope",
        }
    }

    pub fn from_key(key: &str) -> Option<SectionKind> {
        SectionKind::ALL.into_iter().find(|s| s.key() == key)
    }

    fn index(self) -> usize {
        self as usize
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Errors
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    #[error("Report is missing section '{0}'")]
    MissingSection(String),

    #[error("Report contains unexpected section '{0}'")]
    UnexpectedSection(String),

    #[error("Report section '{0}' is empty")]
    EmptySection(String),

    #[error("Report section '{0}' is not text")]
    NonTextSection(String),
}

// ────────────────────────────────────────────────────────────────────────────
// Report
// ────────────────────────────────────────────────────────────────────────────

/// A complete report. Every section holds non-empty text.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "Map<String, Value>")]
pub struct Report {
    sections: [String; 6],
}

impl Serialize for Report {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;
        let mut map = serializer.serialize_map(Some(SectionKind::ALL.len()))?;
        for kind in SectionKind::ALL {
            map.serialize_entry(kind.key(), self.section(kind))?;
        }
        map.end()
    }
}

impl Report {
    pub fn section(&self, kind: SectionKind) -> &str {
        &self.sections[kind.index()]
    }

    /// Returns a copy of this report with one section replaced.
    ///
    /// Rejects empty (or whitespace-only) text so the result is always a valid report.
    pub fn with_section(&self, kind: SectionKind, text: String) -> Result<Report, SchemaError> {
        if text.trim().is_empty() {
            return Err(SchemaError::EmptySection(kind.key().to_string()));
        }
        let mut sections = self.sections.clone();
        sections[kind.index()] = text;
        Ok(Report { sections })
    }

    /// Sections paired with their display titles, in canonical order.
    pub fn titled_sections(&self) -> impl Iterator<Item = (&'static str, &str)> + '_ {
        SectionKind::ALL
            .into_iter()
            .map(move |kind| (kind.title(), self.section(kind)))
    }

    pub fn word_count(&self) -> usize {
        self.sections
            .iter()
            .map(|s| s.split_whitespace().count())
            .sum()
    }
}

impl TryFrom<Map<String, Value>> for Report {
    type Error = SchemaError;

    fn try_from(candidate: Map<String, Value>) -> Result<Self, Self::Error> {
        validate(&candidate)
    }
}

/// Validates a raw section map against the six-section schema.
///
/// Checks run in a fixed order so the reported error is deterministic:
/// missing sections (canonical order), then unknown keys, then empty or non-text values.
pub fn validate(candidate: &Map<String, Value>) -> Result<Report, SchemaError> {
    for kind in SectionKind::ALL {
        if !candidate.contains_key(kind.key()) {
            return Err(SchemaError::MissingSection(kind.key().to_string()));
        }
    }

    if let Some(extra) = candidate
        .keys()
        .find(|k| SectionKind::from_key(k).is_none())
    {
        return Err(SchemaError::UnexpectedSection(extra.clone()));
    }

    let mut sections: [String; 6] = Default::default();
    for kind in SectionKind::ALL {
        let text = match &candidate[kind.key()] {
            Value::String(s) => s,
            Value::Null => return Err(SchemaError::EmptySection(kind.key().to_string())),
            _ => return Err(SchemaError::NonTextSection(kind.key().to_string())),
        };
        if text.trim().is_empty() {
            return Err(SchemaError::EmptySection(kind.key().to_string()));
        }
        sections[kind.index()] = text.clone();
    }

    Ok(Report { sections })
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
