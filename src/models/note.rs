use chrono::{DateTime, Utc};
use diesel::Queryable;

#[derive(Clone, Debug, PartialEq, Eq, Queryable)]
pub struct Note {
    pub id: i32,
    pub title: String,
    pub content: String,
    pub created: DateTime<Utc>,
    pub expires: DateTime<Utc>,
}

/// Raw create-form fields, as sent by the browser.
#[derive(Clone, Debug, Default)]
pub struct NoteForm {
    pub title: Option<String>,
    pub content: Option<String>,
    pub expires: Option<String>,
}

/// A create request whose fields are all present and non-empty.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewNote {
    pub title: String,
    pub content: String,
    pub expires: String,
}

impl NoteForm {
    /// Fills the fields missing here from `fallback`.
    pub fn or(self, fallback: NoteForm) -> NoteForm {
        NoteForm {
            title: self.title.or(fallback.title),
            content: self.content.or(fallback.content),
            expires: self.expires.or(fallback.expires),
        }
    }

    pub fn complete(self) -> Option<NewNote> {
        let present = |field: Option<String>| field.filter(|value| !value.is_empty());

        Some(NewNote {
            title: present(self.title)?,
            content: present(self.content)?,
            expires: present(self.expires)?,
        })
    }
}
