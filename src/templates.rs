use derive_more::Display;
use std::fmt::Write;

use crate::{models::note::Note, utils::escape_html};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Page {
    Home,
    Show,
    Create,
}

/// View model handed to a [`Renderer`].
#[derive(Clone, Debug, Default)]
pub struct TemplateData {
    pub note: Option<Note>,
    pub notes: Option<Vec<Note>>,
}

impl TemplateData {
    pub fn with_note(note: Note) -> Self {
        TemplateData {
            note: Some(note),
            notes: None,
        }
    }

    pub fn with_notes(notes: Vec<Note>) -> Self {
        TemplateData {
            note: None,
            notes: Some(notes),
        }
    }
}

#[derive(Debug, Display)]
pub enum RenderError {
    #[display(fmt = "page {:?} rendered without {}", _0, _1)]
    MissingData(Page, &'static str),
    #[display(fmt = "formatting failed")]
    Format,
}

impl std::error::Error for RenderError {}

impl From<std::fmt::Error> for RenderError {
    fn from(_: std::fmt::Error) -> RenderError {
        RenderError::Format
    }
}

pub trait Renderer: Send + Sync {
    fn render(&self, page: Page, data: &TemplateData) -> Result<String, RenderError>;
}

const LAYOUT_HEAD: &str = r#"<!doctype html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{title} - Notebox</title>
</head>
<body>
<header><h1><a href="/">Notebox</a></h1></header>
<nav><a href="/">Home</a> <a href="/snippet/new">Create note</a></nav>
<main>
"#;

const LAYOUT_FOOT: &str = r#"</main>
<footer>Notes expire on their own. Nothing here lasts.</footer>
</body>
</html>
"#;

const CREATE_FORM: &str = r#"<form action="/snippet/new" method="POST">
<div><label>Title:</label> <input type="text" name="title"></div>
<div><label>Content:</label> <textarea name="content"></textarea></div>
<div><label>Delete in:</label>
<input type="radio" name="expires" value="365" checked> One year
<input type="radio" name="expires" value="7"> One week
<input type="radio" name="expires" value="1"> One day
</div>
<div><input type="submit" value="Publish note"></div>
</form>
"#;

const DATE_FORMAT: &str = "%d %b %Y at %H:%M";

/// Renders the built-in HTML pages.
#[derive(Default)]
pub struct HtmlRenderer;

impl HtmlRenderer {
    fn home(out: &mut String, data: &TemplateData) -> Result<(), RenderError> {
        let notes = data
            .notes
            .as_ref()
            .ok_or(RenderError::MissingData(Page::Home, "notes"))?;

        out.push_str("<h2>Latest notes</h2>\n");
        if notes.is_empty() {
            out.push_str("<p>There's nothing to see here... yet!</p>\n");
            return Ok(());
        }

        out.push_str("<table>\n<tr><th>Title</th><th>Created</th><th>ID</th></tr>\n");
        for note in notes {
            writeln!(
                out,
                r#"<tr><td><a href="/snippet?id={id}">{title}</a></td><td>{created}</td><td>#{id}</td></tr>"#,
                id = note.id,
                title = escape_html(&note.title),
                created = note.created.format(DATE_FORMAT),
            )?;
        }
        out.push_str("</table>\n");
        Ok(())
    }

    fn show(out: &mut String, data: &TemplateData) -> Result<(), RenderError> {
        let note = data
            .note
            .as_ref()
            .ok_or(RenderError::MissingData(Page::Show, "a note"))?;

        write!(
            out,
            "<article>\n<h2>{title}</h2>\n<span>#{id}</span>\n<pre><code>{content}</code></pre>\n\
             <p>Created: {created}</p>\n<p>Expires: {expires}</p>\n</article>\n",
            title = escape_html(&note.title),
            id = note.id,
            content = escape_html(&note.content),
            created = note.created.format(DATE_FORMAT),
            expires = note.expires.format(DATE_FORMAT),
        )?;
        Ok(())
    }

    fn title(page: Page, data: &TemplateData) -> String {
        match (page, &data.note) {
            (Page::Show, Some(note)) => format!("Note #{}", note.id),
            (Page::Create, _) => "Create a new note".to_string(),
            _ => "Home".to_string(),
        }
    }
}

impl Renderer for HtmlRenderer {
    fn render(&self, page: Page, data: &TemplateData) -> Result<String, RenderError> {
        let mut out = LAYOUT_HEAD.replace("{title}", &Self::title(page, data));

        match page {
            Page::Home => Self::home(&mut out, data)?,
            Page::Show => Self::show(&mut out, data)?,
            Page::Create => out.push_str(CREATE_FORM),
        }

        out.push_str(LAYOUT_FOOT);
        Ok(out)
    }
}
