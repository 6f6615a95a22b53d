use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use super::resolve_couple;
use crate::domain::{Couple, DateFilter, DateKind, DatePlan, Note, Page, PageRequest, User};
use crate::error::DomainError;
use crate::ports::{CoupleRepository, DateRepository, NoteRepository, UserRepository};

const TITLE_LEN: std::ops::RangeInclusive<usize> = 3..=200;
const NOTE_LEN: std::ops::RangeInclusive<usize> = 1..=5000;

#[derive(Debug, Clone)]
pub struct NewDate {
    pub title: String,
    pub description: Option<String>,
    pub scheduled_at: DateTime<Utc>,
    pub kind: Option<DateKind>,
}

/// Partial update. `description: Some(None)` clears the description.
#[derive(Debug, Clone, Default)]
pub struct DateChanges {
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    pub scheduled_at: Option<DateTime<Utc>>,
    pub kind: Option<DateKind>,
}

/// Public part of a note author's profile.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Author {
    pub id: Uuid,
    pub name: String,
    pub profile_photo: Option<String>,
}

impl From<&User> for Author {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            profile_photo: user.profile_photo.clone(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct NoteWithAuthor {
    pub note: Note,
    pub author: Option<Author>,
}

#[derive(Debug, Clone)]
pub struct DateWithNotes {
    pub date: DatePlan,
    pub notes: Vec<NoteWithAuthor>,
}

/// Dates and the notes attached to them.
#[derive(Clone)]
pub struct DateService {
    couples: Arc<dyn CoupleRepository>,
    dates: Arc<dyn DateRepository>,
    notes: Arc<dyn NoteRepository>,
    users: Arc<dyn UserRepository>,
}

impl DateService {
    pub fn new(
        couples: Arc<dyn CoupleRepository>,
        dates: Arc<dyn DateRepository>,
        notes: Arc<dyn NoteRepository>,
        users: Arc<dyn UserRepository>,
    ) -> Self {
        Self {
            couples,
            dates,
            notes,
            users,
        }
    }

    pub async fn create(&self, user_id: Uuid, new: NewDate) -> Result<DateWithNotes, DomainError> {
        let couple = self.couple(user_id).await?;
        let title = checked_title(&new.title)?;
        let date = DatePlan::new(
            couple.id,
            title,
            non_blank(new.description),
            new.scheduled_at,
            new.kind.unwrap_or_default(),
        );
        let date = self.dates.insert(date).await?;

        tracing::info!(date_id = %date.id, couple_id = %couple.id, "Date created");
        Ok(DateWithNotes {
            date,
            notes: Vec::new(),
        })
    }

    /// A page of the couple's dates, each with its notes.
    pub async fn list(
        &self,
        user_id: Uuid,
        filter: DateFilter,
        page: PageRequest,
    ) -> Result<Page<DateWithNotes>, DomainError> {
        let couple = self.couple(user_id).await?;
        let dates = self.dates.list(couple.id, &filter, page).await?;

        let ids: Vec<Uuid> = dates.items.iter().map(|date| date.id).collect();
        let notes = self
            .with_authors(self.notes.list_for_dates(&ids).await?)
            .await?;

        let mut by_date: HashMap<Uuid, Vec<NoteWithAuthor>> = HashMap::new();
        for note in notes {
            by_date.entry(note.note.date_id).or_default().push(note);
        }

        Ok(dates.map(|date| DateWithNotes {
            notes: by_date.remove(&date.id).unwrap_or_default(),
            date,
        }))
    }

    pub async fn get(&self, user_id: Uuid, id: Uuid) -> Result<DateWithNotes, DomainError> {
        let couple = self.couple(user_id).await?;
        let date = self.date_of(&couple, id).await?;
        let notes = self
            .with_authors(self.notes.list_for_date(date.id).await?)
            .await?;
        Ok(DateWithNotes { date, notes })
    }

    pub async fn update(
        &self,
        user_id: Uuid,
        id: Uuid,
        changes: DateChanges,
    ) -> Result<DateWithNotes, DomainError> {
        let couple = self.couple(user_id).await?;
        let mut date = self.date_of(&couple, id).await?;

        if let Some(title) = changes.title {
            date.title = checked_title(&title)?;
        }
        if let Some(description) = changes.description {
            date.description = non_blank(description);
        }
        if let Some(scheduled_at) = changes.scheduled_at {
            date.scheduled_at = scheduled_at;
        }
        if let Some(kind) = changes.kind {
            date.kind = kind;
        }
        date.updated_at = Utc::now();

        let date = self.dates.update(date).await?;
        let notes = self
            .with_authors(self.notes.list_for_date(date.id).await?)
            .await?;
        Ok(DateWithNotes { date, notes })
    }

    /// Delete a date. Its notes go with it.
    pub async fn delete(&self, user_id: Uuid, id: Uuid) -> Result<(), DomainError> {
        let couple = self.couple(user_id).await?;
        let date = self.date_of(&couple, id).await?;
        self.dates.delete(date.id).await?;

        tracing::info!(date_id = %date.id, couple_id = %couple.id, "Date deleted");
        Ok(())
    }

    pub async fn add_note(
        &self,
        user_id: Uuid,
        date_id: Uuid,
        text: &str,
    ) -> Result<NoteWithAuthor, DomainError> {
        let couple = self.couple(user_id).await?;
        let date = self.date_of(&couple, date_id).await?;
        let note = Note::new(date.id, user_id, checked_note(text)?);
        let note = self.notes.insert(note).await?;
        self.with_author(note).await
    }

    pub async fn list_notes(
        &self,
        user_id: Uuid,
        date_id: Uuid,
    ) -> Result<Vec<NoteWithAuthor>, DomainError> {
        let couple = self.couple(user_id).await?;
        let date = self.date_of(&couple, date_id).await?;
        self.with_authors(self.notes.list_for_date(date.id).await?)
            .await
    }

    /// Only the author may edit a note.
    pub async fn update_note(
        &self,
        user_id: Uuid,
        note_id: Uuid,
        text: &str,
    ) -> Result<NoteWithAuthor, DomainError> {
        let mut note = self.authored_note(user_id, note_id).await?;
        note.text = checked_note(text)?;
        note.updated_at = Utc::now();
        let note = self.notes.update(note).await?;
        self.with_author(note).await
    }

    /// Only the author may delete a note.
    pub async fn delete_note(&self, user_id: Uuid, note_id: Uuid) -> Result<(), DomainError> {
        let note = self.authored_note(user_id, note_id).await?;
        self.notes.delete(note.id).await?;
        Ok(())
    }

    async fn couple(&self, user_id: Uuid) -> Result<Couple, DomainError> {
        resolve_couple(self.couples.as_ref(), user_id).await
    }

    async fn date_of(&self, couple: &Couple, id: Uuid) -> Result<DatePlan, DomainError> {
        self.dates
            .find_for_couple(couple.id, id)
            .await?
            .ok_or_else(|| DomainError::not_found("Date", id))
    }

    /// A note on one of the couple's dates, written by `user_id`.
    async fn authored_note(&self, user_id: Uuid, note_id: Uuid) -> Result<Note, DomainError> {
        let couple = self.couple(user_id).await?;
        let note = self
            .notes
            .find_by_id(note_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Note", note_id))?;
        if self
            .dates
            .find_for_couple(couple.id, note.date_id)
            .await?
            .is_none()
        {
            return Err(DomainError::not_found("Note", note_id));
        }
        if note.author_id != user_id {
            return Err(DomainError::Forbidden(
                "only the author can change this note".to_string(),
            ));
        }
        Ok(note)
    }

    async fn with_author(&self, note: Note) -> Result<NoteWithAuthor, DomainError> {
        let author = self.users.find_by_id(note.author_id).await?;
        Ok(NoteWithAuthor {
            author: author.as_ref().map(Author::from),
            note,
        })
    }

    async fn with_authors(&self, notes: Vec<Note>) -> Result<Vec<NoteWithAuthor>, DomainError> {
        let mut ids: Vec<Uuid> = notes.iter().map(|note| note.author_id).collect();
        ids.sort_unstable();
        ids.dedup();

        let authors: HashMap<Uuid, Author> = self
            .users
            .find_many(&ids)
            .await?
            .iter()
            .map(|user| (user.id, Author::from(user)))
            .collect();

        Ok(notes
            .into_iter()
            .map(|note| NoteWithAuthor {
                author: authors.get(&note.author_id).cloned(),
                note,
            })
            .collect())
    }
}

fn checked_title(title: &str) -> Result<String, DomainError> {
    let title = title.trim();
    if !TITLE_LEN.contains(&title.chars().count()) {
        return Err(DomainError::Validation(format!(
            "title must be between {} and {} characters",
            TITLE_LEN.start(),
            TITLE_LEN.end()
        )));
    }
    Ok(title.to_string())
}

fn checked_note(text: &str) -> Result<String, DomainError> {
    let text = text.trim();
    if !NOTE_LEN.contains(&text.chars().count()) {
        return Err(DomainError::Validation(format!(
            "note text must be between {} and {} characters",
            NOTE_LEN.start(),
            NOTE_LEN.end()
        )));
    }
    Ok(text.to_string())
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
