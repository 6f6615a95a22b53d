use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use twogether_core::domain::{DateFilter, DateKind, PageRequest};
use twogether_core::services::{Author, DateChanges, DateWithNotes, NewDate, NoteWithAuthor};

use super::{double_option, page_request, present};

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateDateRequest {
    #[serde(default)]
    #[validate(length(min = 3, max = 200, message = "Title must be 3-200 characters"))]
    pub title: String,

    pub description: Option<String>,

    pub scheduled_at: DateTime<Utc>,

    pub kind: Option<DateKind>,
}

impl From<CreateDateRequest> for NewDate {
    fn from(req: CreateDateRequest) -> Self {
        Self {
            title: req.title,
            description: req.description,
            scheduled_at: req.scheduled_at,
            kind: req.kind,
        }
    }
}

/// Partial update. An explicit `"description": null` clears the description.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateDateRequest {
    #[validate(length(min = 3, max = 200, message = "Title must be 3-200 characters"))]
    pub title: Option<String>,

    #[serde(default, deserialize_with = "double_option")]
    pub description: Option<Option<String>>,

    pub scheduled_at: Option<DateTime<Utc>>,

    pub kind: Option<DateKind>,
}

impl From<UpdateDateRequest> for DateChanges {
    fn from(req: UpdateDateRequest) -> Self {
        Self {
            title: req.title,
            description: req.description,
            scheduled_at: req.scheduled_at,
            kind: req.kind,
        }
    }
}

/// `GET /dates` query string.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DateListQuery {
    pub kind: Option<String>,
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
    pub limit: Option<u64>,
    pub offset: Option<u64>,
}

impl DateListQuery {
    /// Unknown kinds are ignored rather than rejected.
    pub fn filter(&self) -> DateFilter {
        DateFilter {
            kind: present(&self.kind).and_then(|k| k.parse().ok()),
            from: self.from,
            to: self.to,
        }
    }

    pub fn page(&self) -> PageRequest {
        page_request(self.limit, self.offset)
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AddNoteRequest {
    pub date_id: Uuid,

    #[serde(default)]
    #[validate(length(min = 1, max = 5000, message = "Note must be 1-5000 characters"))]
    pub text: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NoteRequest {
    #[serde(default)]
    #[validate(length(min = 1, max = 5000, message = "Note must be 1-5000 characters"))]
    pub text: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct NoteResponse {
    pub id: Uuid,
    pub date_id: Uuid,
    pub text: String,
    pub author: Option<Author>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<NoteWithAuthor> for NoteResponse {
    fn from(n: NoteWithAuthor) -> Self {
        Self {
            id: n.note.id,
            date_id: n.note.date_id,
            text: n.note.text,
            author: n.author,
            created_at: n.note.created_at,
            updated_at: n.note.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct NotesResponse {
    pub notes: Vec<NoteResponse>,
    pub total: usize,
}

impl From<Vec<NoteWithAuthor>> for NotesResponse {
    fn from(notes: Vec<NoteWithAuthor>) -> Self {
        let notes: Vec<NoteResponse> = notes.into_iter().map(NoteResponse::from).collect();
        Self {
            total: notes.len(),
            notes,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DateResponse {
    pub id: Uuid,
    pub couple_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub scheduled_at: DateTime<Utc>,
    pub kind: DateKind,
    pub notes: Vec<NoteResponse>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<DateWithNotes> for DateResponse {
    fn from(d: DateWithNotes) -> Self {
        Self {
            id: d.date.id,
            couple_id: d.date.couple_id,
            title: d.date.title,
            description: d.date.description,
            scheduled_at: d.date.scheduled_at,
            kind: d.date.kind,
            notes: d.notes.into_iter().map(NoteResponse::from).collect(),
            created_at: d.date.created_at,
            updated_at: d.date.updated_at,
        }
    }
}
