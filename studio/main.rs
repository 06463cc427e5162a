/// kmeans-quant Studio
///
/// A browser upload form around the quantizer: pick an image and a color
/// count, preview the extracted palette, download the quantized BMP.
/// Served by a synchronous tiny_http server; no JavaScript frameworks required.
///
/// Run with:
///   cargo run --bin studio --release
/// Then open http://127.0.0.1:8080
///
/// Routes:
///   GET  /         upload form
///   POST /convert  quantized image as a BMP download
///   POST /preview  palette as JSON

mod config;
mod state;
mod render;
mod routes;
mod handlers;
mod util;

use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::thread;

use anyhow::{anyhow, Result};
use log::{info, warn};
use tiny_http::Server;

use config::StudioConfig;
use state::StudioState;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = StudioConfig::from_env()?;
    let addr = config.addr();
    let server = Arc::new(
        Server::http(&addr).map_err(|e| anyhow!("failed to bind HTTP server on {addr}: {e}"))?,
    );

    info!("kmeans-quant Studio listening on http://{addr}");
    info!(
        "{} worker threads, uploads up to {} MB; press Ctrl+C to stop",
        config.workers,
        config.max_upload_bytes / (1024 * 1024)
    );

    let shared_state = Arc::new(StudioState::new(config));

    // A fixed pool of workers pulls from the same listener; each request is
    // handled start to finish on one worker with its own image buffers.
    let mut workers = Vec::with_capacity(shared_state.config.workers);
    for id in 0..shared_state.config.workers {
        let server = Arc::clone(&server);
        let state = Arc::clone(&shared_state);
        let handle = thread::Builder::new()
            .name(format!("studio-worker-{id}"))
            .spawn(move || {
                for request in server.incoming_requests() {
                    let url = request.url().to_owned();
                    if !run_guarded(|| routes::dispatch(request, &state)) {
                        warn!("handler panicked while serving {url}");
                    }
                }
            })?;
        workers.push(handle);
    }

    for handle in workers {
        let name = handle.thread().name().unwrap_or("studio-worker").to_owned();
        if handle.join().is_err() {
            warn!("{name} panicked and stopped serving requests");
        }
    }
    Ok(())
}

/// Runs one request handler, containing a panic to that request so the
/// worker keeps serving. Returns `false` if it panicked.
fn run_guarded<F: FnOnce()>(handler: F) -> bool {
    panic::catch_unwind(AssertUnwindSafe(handler)).is_ok()
}
