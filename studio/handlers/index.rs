use crate::render::render_index;
use crate::routes::HttpResponse;
use crate::state::SharedState;

// ---------------------------------------------------------------------------
// GET /
// ---------------------------------------------------------------------------

pub fn handle_get(state: &SharedState) -> HttpResponse {
    crate::routes::html_response(200, render_index(None, max_upload_mb(state)))
}

/// Re-renders the form with an error message above it.
pub fn show_error(state: &SharedState, status: u16, msg: &str) -> HttpResponse {
    crate::routes::html_response(status, render_index(Some(msg), max_upload_mb(state)))
}

fn max_upload_mb(state: &SharedState) -> usize {
    state.config.max_upload_bytes / (1024 * 1024)
}
