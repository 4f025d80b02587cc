use actix_web::{http::Method, web, HttpMessage, HttpRequest};

use crate::{errors::ServerError, models::note::NoteForm};

/// Reads the create-form fields from the query string and, for form
/// submissions, from the body. Posted values win over query values.
pub fn parse_form(req: &HttpRequest, body: &[u8]) -> Result<NoteForm, ServerError> {
    let query = decode_form(req.query_string())?;
    if !carries_form_body(req) {
        return Ok(query);
    }

    let raw = std::str::from_utf8(body).map_err(|_| ServerError::InvalidForm)?;
    Ok(decode_form(raw)?.or(query))
}

fn decode_form(raw: &str) -> Result<NoteForm, ServerError> {
    let pairs = decode_pairs(raw)?;
    Ok(NoteForm {
        title: first_value(&pairs, "title"),
        content: first_value(&pairs, "content"),
        expires: first_value(&pairs, "expires"),
    })
}

/// Decodes urlencoded data in order, repeated keys included.
pub fn decode_pairs(raw: &str) -> Result<Vec<(String, String)>, ServerError> {
    web::Query::<Vec<(String, String)>>::from_query(raw)
        .map(web::Query::into_inner)
        .map_err(|err| {
            log::debug!("rejecting form data: {}", err);
            ServerError::InvalidForm
        })
}

/// The first value sent for `key`; later repeats are ignored.
pub fn first_value(pairs: &[(String, String)], key: &str) -> Option<String> {
    pairs
        .iter()
        .find(|(name, _)| name == key)
        .map(|(_, value)| value.clone())
}

fn carries_form_body(req: &HttpRequest) -> bool {
    let method = req.method();
    let body_method = method == Method::POST || method == Method::PUT || method == Method::PATCH;
    body_method && req.content_type() == "application/x-www-form-urlencoded"
}

pub fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&#34;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{http::header, test::TestRequest};

    #[test]
    fn escapes_markup() {
        assert_eq!(
            escape_html(r#"<a href="x">Tom & 'Jerry'</a>"#),
            "&lt;a href=&#34;x&#34;&gt;Tom &amp; &#39;Jerry&#39;&lt;/a&gt;"
        );
        assert_eq!(escape_html("plain"), "plain");
    }

    #[test]
    fn query_fields_are_read_for_any_method() {
        let req = TestRequest::get()
            .uri("/snippet/new?title=T&content=C&expires=7")
            .to_http_request();

        let form = parse_form(&req, b"").unwrap();
        assert_eq!(form.title.as_deref(), Some("T"));
        assert_eq!(form.expires.as_deref(), Some("7"));
    }

    #[test]
    fn repeated_keys_keep_the_first_value() {
        let req = TestRequest::post()
            .uri("/snippet/new")
            .insert_header((header::CONTENT_TYPE, "application/x-www-form-urlencoded"))
            .to_http_request();

        let form = parse_form(&req, b"title=a&title=b&content=C&expires=7").unwrap();
        assert_eq!(form.title.as_deref(), Some("a"));
        assert_eq!(form.content.as_deref(), Some("C"));
    }

    #[test]
    fn body_is_ignored_without_form_content_type() {
        let req = TestRequest::post()
            .uri("/snippet/new")
            .insert_header((header::CONTENT_TYPE, "text/plain"))
            .to_http_request();

        let form = parse_form(&req, b"title=T&content=C&expires=7").unwrap();
        assert!(form.title.is_none());
    }

    #[test]
    fn posted_body_overrides_query() {
        let req = TestRequest::post()
            .uri("/snippet/new?title=query&content=C")
            .insert_header((header::CONTENT_TYPE, "application/x-www-form-urlencoded"))
            .to_http_request();

        let form = parse_form(&req, b"title=body+title&expires=7").unwrap();
        assert_eq!(form.title.as_deref(), Some("body title"));
        assert_eq!(form.content.as_deref(), Some("C"));
        assert_eq!(form.expires.as_deref(), Some("7"));
    }

    #[test]
    fn undecodable_body_is_rejected() {
        let req = TestRequest::post()
            .uri("/snippet/new")
            .insert_header((header::CONTENT_TYPE, "application/x-www-form-urlencoded"))
            .to_http_request();

        assert!(matches!(
            parse_form(&req, &[0xff, 0xfe, 0xfd]),
            Err(ServerError::InvalidForm)
        ));
    }
}
