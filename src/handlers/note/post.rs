use actix_web::{http::Method, web, HttpRequest, HttpResponse};

use crate::{
    errors::ServerError,
    handlers::{redirect_to_note, render, with_store},
    templates::{Page, TemplateData},
    utils, AppState,
};

const SAMPLE_TITLE: &str = "An old silent pond";
const SAMPLE_CONTENT: &str = "An old silent pond...\nA frog jumps into the pond,\nsplash! Silence again.";
const SAMPLE_TTL_DAYS: &str = "7";

/// Shows the create form, or stores the note once every field is filled in.
pub async fn create_page(
    req: HttpRequest,
    body: web::Bytes,
    state: web::Data<AppState>,
) -> Result<HttpResponse, ServerError> {
    let form = utils::parse_form(&req, &body)?;

    let new_note = match form.complete() {
        Some(new_note) => new_note,
        None => return render(&state, Page::Create, &TemplateData::default()),
    };

    // only checked once the form is complete, so a GET with partial fields still gets the form
    if req.method() != Method::POST {
        return Err(ServerError::MethodNotAllowed("POST"));
    }

    let note_id = with_store(&state, move |store| {
        store.insert(&new_note.title, &new_note.content, &new_note.expires)
    })
    .await?;
    log::info!("created note {}", note_id);

    Ok(redirect_to_note(note_id))
}

pub async fn create_fixed(
    req: HttpRequest,
    state: web::Data<AppState>,
) -> Result<HttpResponse, ServerError> {
    if req.method() != Method::POST {
        return Err(ServerError::MethodNotAllowed("POST"));
    }

    let note_id = with_store(&state, |store| {
        store.insert(SAMPLE_TITLE, SAMPLE_CONTENT, SAMPLE_TTL_DAYS)
    })
    .await?;

    Ok(redirect_to_note(note_id))
}
