use chrono::{Duration, Utc};
use std::sync::Mutex;

use super::{NoteStore, StoreError, LATEST_LIMIT};
use crate::models::note::Note;

/// Keeps notes in a vector; stands in for Postgres in handler tests.
#[derive(Default)]
pub struct MemoryNoteStore {
    notes: Mutex<Vec<Note>>,
}

impl MemoryNoteStore {
    pub fn len(&self) -> usize {
        self.notes.lock().unwrap().len()
    }
}

impl NoteStore for MemoryNoteStore {
    fn insert(&self, title: &str, content: &str, ttl_days: &str) -> Result<i32, StoreError> {
        let days = ttl_days
            .trim()
            .parse::<i64>()
            .map_err(|err| diesel::result::Error::QueryBuilderError(err.into()))?;

        let mut notes = self.notes.lock().unwrap();
        let created = Utc::now();
        let id = notes.len() as i32 + 1;
        notes.push(Note {
            id,
            title: title.to_owned(),
            content: content.to_owned(),
            created,
            expires: created + Duration::days(days),
        });
        Ok(id)
    }

    fn get(&self, id: i32) -> Result<Option<Note>, StoreError> {
        let now = Utc::now();
        let notes = self.notes.lock().unwrap();
        Ok(notes
            .iter()
            .find(|note| note.id == id && note.expires > now)
            .cloned())
    }

    fn latest(&self) -> Result<Vec<Note>, StoreError> {
        let now = Utc::now();
        let mut live: Vec<Note> = self
            .notes
            .lock()
            .unwrap()
            .iter()
            .filter(|note| note.expires > now)
            .cloned()
            .collect();
        live.sort_by(|a, b| (b.created, b.id).cmp(&(a.created, a.id)));
        live.truncate(LATEST_LIMIT as usize);
        Ok(live)
    }
}

/// Fails every call the way an unreachable database would.
pub struct BrokenNoteStore;

impl NoteStore for BrokenNoteStore {
    fn insert(&self, _: &str, _: &str, _: &str) -> Result<i32, StoreError> {
        Err(diesel::result::Error::BrokenTransactionManager.into())
    }

    fn get(&self, _: i32) -> Result<Option<Note>, StoreError> {
        Err(diesel::result::Error::BrokenTransactionManager.into())
    }

    fn latest(&self) -> Result<Vec<Note>, StoreError> {
        Err(diesel::result::Error::BrokenTransactionManager.into())
    }
}
