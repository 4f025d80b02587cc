use derive_more::Display;

use crate::models::note::Note;

pub mod postgres;

#[cfg(test)]
pub mod memory;

pub use postgres::{build_pool, run_migrations, PgNoteStore};

/// Number of notes returned by [`NoteStore::latest`].
pub const LATEST_LIMIT: i64 = 10;

#[derive(Debug, Display)]
pub enum StoreError {
    #[display(fmt = "diesel error: {}", _0)]
    DieselError(diesel::result::Error),
    #[display(fmt = "pooling error: {}", _0)]
    R2D2Error(r2d2::Error),
    #[display(fmt = "store call exceeded its deadline")]
    Timeout,
    #[display(fmt = "store call was canceled")]
    Canceled,
}

impl std::error::Error for StoreError {}

impl From<diesel::result::Error> for StoreError {
    fn from(err: diesel::result::Error) -> StoreError {
        StoreError::DieselError(err)
    }
}

impl From<r2d2::Error> for StoreError {
    fn from(err: r2d2::Error) -> StoreError {
        StoreError::R2D2Error(err)
    }
}

/// Persistence for notes. Expired notes are invisible to every read.
pub trait NoteStore: Send + Sync {
    /// Stores a note living `ttl_days` days from now and returns its id.
    ///
    /// `ttl_days` is handed to the backend unparsed; text it cannot read
    /// as a whole number of days fails the insert.
    fn insert(&self, title: &str, content: &str, ttl_days: &str) -> Result<i32, StoreError>;

    /// Looks up a live note. `Ok(None)` means no live note has this id.
    fn get(&self, id: i32) -> Result<Option<Note>, StoreError>;

    /// The [`LATEST_LIMIT`] most recently created live notes, newest first.
    fn latest(&self) -> Result<Vec<Note>, StoreError>;
}
