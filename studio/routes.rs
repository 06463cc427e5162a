use std::io::Cursor;
use tiny_http::{Header, Method, Request, Response, StatusCode};

use crate::state::SharedState;
use crate::handlers;

pub type HttpResponse = Response<Cursor<Vec<u8>>>;

// ---------------------------------------------------------------------------
// Response helpers
// ---------------------------------------------------------------------------

/// Header values are constants or ASCII-only sanitized filenames.
fn header(name: &str, value: &str) -> Header {
    Header::from_bytes(name.as_bytes(), value.as_bytes()).expect("ASCII header")
}

fn bytes_response(status: u16, content_type: &str, bytes: Vec<u8>, extra: Vec<Header>) -> HttpResponse {
    let len = bytes.len();
    let mut headers = vec![header("Content-Type", content_type)];
    headers.extend(extra);
    Response::new(StatusCode(status), headers, Cursor::new(bytes), Some(len), None)
}

pub fn html_response(status: u16, body: String) -> HttpResponse {
    bytes_response(status, "text/html; charset=utf-8", body.into_bytes(), Vec::new())
}

pub fn json_response(status: u16, body: String) -> HttpResponse {
    bytes_response(status, "application/json", body.into_bytes(), Vec::new())
}

pub fn bmp_download_response(bytes: Vec<u8>, filename: &str) -> HttpResponse {
    let disposition = format!("attachment; filename=\"{}\"", filename);
    bytes_response(200, "image/bmp", bytes, vec![header("Content-Disposition", &disposition)])
}

pub fn not_found() -> HttpResponse {
    bytes_response(404, "text/plain", b"404 Not Found".to_vec(), Vec::new())
}

// ---------------------------------------------------------------------------
// Request dispatcher
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Index,
    Convert,
    Preview,
    NotFound,
}

/// Maps a method and URL (query string ignored) to a route.
pub fn resolve(method: &Method, url: &str) -> Route {
    let path = url.split('?').next().unwrap_or("");
    match (method, path) {
        (Method::Get,  "/")        => Route::Index,
        (Method::Post, "/convert") => Route::Convert,
        (Method::Post, "/preview") => Route::Preview,
        _ => Route::NotFound,
    }
}

/// Dispatches one request to its handler and sends the response.
///
/// Handlers receive a `&mut Request` so that the dispatcher retains ownership
/// and can call `request.respond(response)` at the end.
pub fn dispatch(mut request: Request, state: &SharedState) {
    let url = request.url().to_owned();

    let response = match resolve(request.method(), &url) {
        Route::Index    => handlers::index::handle_get(state),
        Route::Convert  => handlers::convert::handle_convert(&mut request, state),
        Route::Preview  => handlers::convert::handle_preview(&mut request, state),
        Route::NotFound => not_found(),
    };

    log::info!("{} {} -> {}", request.method(), url, response.status_code().0);
    if let Err(e) = request.respond(response) {
        log::warn!("failed to send response for {url}: {e}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::index(Method::Get, "/", Route::Index)]
    #[case::index_with_query(Method::Get, "/?from=nav", Route::Index)]
    #[case::convert(Method::Post, "/convert", Route::Convert)]
    #[case::preview(Method::Post, "/preview?x=1", Route::Preview)]
    #[case::get_convert(Method::Get, "/convert", Route::NotFound)]
    #[case::post_index(Method::Post, "/", Route::NotFound)]
    #[case::unknown(Method::Get, "/favicon.ico", Route::NotFound)]
    #[case::trailing_slash(Method::Post, "/preview/", Route::NotFound)]
    fn requests_resolve_to_routes(#[case] method: Method, #[case] url: &str, #[case] route: Route) {
        assert_eq!(resolve(&method, url), route);
    }

    #[test]
    fn fallback_is_a_404() {
        assert_eq!(not_found().status_code().0, 404);
    }

    #[test]
    fn downloads_are_bmp_attachments() {
        let response = bmp_download_response(b"BM".to_vec(), "photo_3colors.bmp");
        assert_eq!(response.status_code().0, 200);
        let headers: Vec<(String, String)> = response
            .headers()
            .iter()
            .map(|h| (h.field.as_str().to_string(), h.value.as_str().to_owned()))
            .collect();
        assert!(headers.contains(&("Content-Type".to_owned(), "image/bmp".to_owned())));
        assert!(headers.contains(&(
            "Content-Disposition".to_owned(),
            "attachment; filename=\"photo_3colors.bmp\"".to_owned()
        )));
    }
}
