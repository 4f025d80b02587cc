use actix_web::{
    http::header::{self, ContentType},
    rt::time::timeout,
    web, HttpResponse,
};
use std::sync::Arc;

use crate::{
    errors::ServerError,
    store::{NoteStore, StoreError},
    templates::{Page, TemplateData},
    AppState,
};

pub mod note;

pub async fn not_found() -> Result<HttpResponse, ServerError> {
    Err(ServerError::NotFound)
}

pub async fn get_only() -> Result<HttpResponse, ServerError> {
    Err(ServerError::MethodNotAllowed("GET"))
}

/// Runs one store operation on the blocking pool, bounded by the store deadline.
pub async fn with_store<T, F>(state: &AppState, op: F) -> Result<T, ServerError>
where
    F: FnOnce(&dyn NoteStore) -> Result<T, StoreError> + Send + 'static,
    T: Send + 'static,
{
    let store = Arc::clone(&state.store);
    let call = web::block(move || op(store.as_ref()));

    match timeout(state.store_timeout, call).await {
        Ok(Ok(result)) => Ok(result?),
        Ok(Err(_)) => Err(StoreError::Canceled.into()),
        Err(_) => Err(StoreError::Timeout.into()),
    }
}

pub fn render(state: &AppState, page: Page, data: &TemplateData) -> Result<HttpResponse, ServerError> {
    let body = state.renderer.render(page, data)?;
    Ok(HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(body))
}

pub fn redirect_to_note(note_id: i32) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, format!("/snippet?id={}", note_id)))
        .finish()
}

#[cfg(test)]
pub mod testing {
    use std::{sync::Arc, time::Duration};

    use crate::{
        models::note::Note,
        store::{NoteStore, StoreError},
        templates::{HtmlRenderer, Page, RenderError, Renderer, TemplateData},
        AppState,
    };

    pub fn state(store: Arc<dyn NoteStore>) -> AppState {
        AppState {
            store,
            renderer: Arc::new(HtmlRenderer),
            store_timeout: Duration::from_secs(2),
        }
    }

    pub struct BrokenRenderer;

    impl Renderer for BrokenRenderer {
        fn render(&self, _: Page, _: &TemplateData) -> Result<String, RenderError> {
            Err(RenderError::Format)
        }
    }

    /// Answers every call, but only after the deadline has passed.
    pub struct SlowNoteStore(pub Duration);

    impl NoteStore for SlowNoteStore {
        fn insert(&self, _: &str, _: &str, _: &str) -> Result<i32, StoreError> {
            std::thread::sleep(self.0);
            Ok(1)
        }

        fn get(&self, _: i32) -> Result<Option<Note>, StoreError> {
            std::thread::sleep(self.0);
            Ok(None)
        }

        fn latest(&self) -> Result<Vec<Note>, StoreError> {
            std::thread::sleep(self.0);
            Ok(Vec::new())
        }
    }
}
