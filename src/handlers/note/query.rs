use actix_web::{web, HttpRequest, HttpResponse};

use crate::{
    errors::ServerError,
    handlers::{render, with_store},
    templates::{Page, TemplateData},
    utils, AppState,
};

pub async fn home(state: web::Data<AppState>) -> Result<HttpResponse, ServerError> {
    let notes = with_store(&state, |store| store.latest()).await?;
    render(&state, Page::Home, &TemplateData::with_notes(notes))
}

pub async fn show(
    req: HttpRequest,
    state: web::Data<AppState>,
) -> Result<HttpResponse, ServerError> {
    // a bad id is reported the same way as a missing note
    let note_id = requested_id(req.query_string()).ok_or(ServerError::NotFound)?;

    match with_store(&state, move |store| store.get(note_id)).await? {
        Some(note) => render(&state, Page::Show, &TemplateData::with_note(note)),
        None => Err(ServerError::NotFound),
    }
}

fn requested_id(query: &str) -> Option<i32> {
    let pairs = utils::decode_pairs(query).ok()?;
    utils::first_value(&pairs, "id")?
        .parse::<i32>()
        .ok()
        .filter(|note_id| *note_id >= 1)
}
