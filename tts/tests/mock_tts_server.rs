use serde_json::Value;
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;
use warp::Filter;

/// Serve `response` for every `POST /v1/tts` and record the last JSON body.
pub async fn spawn_mock_tts(
    response: Vec<u8>,
) -> (String, Arc<Mutex<Option<Value>>>, mpsc::Sender<()>) {
    let (shutdown_tx, mut shutdown_rx) = mpsc::channel(1);
    let seen = Arc::new(Mutex::new(None));
    let record = seen.clone();
    let route = warp::post()
        .and(warp::path("v1").and(warp::path("tts")))
        .and(warp::body::json())
        .map(move |body: Value| {
            *record.lock().unwrap() = Some(body);
            warp::reply::Response::new(response.clone().into())
        });

    let (addr, server) =
        warp::serve(route).bind_with_graceful_shutdown(([127, 0, 0, 1], 0), async move {
            shutdown_rx.recv().await;
        });
    tokio::spawn(server);
    let url = format!("http://{}", addr);
    (url, seen, shutdown_tx)
}

/// Answer every request with a server error.
pub async fn spawn_failing_tts() -> (String, mpsc::Sender<()>) {
    let (shutdown_tx, mut shutdown_rx) = mpsc::channel(1);
    let route = warp::post().map(|| {
        warp::reply::with_status("boom", warp::http::StatusCode::INTERNAL_SERVER_ERROR)
    });
    let (addr, server) =
        warp::serve(route).bind_with_graceful_shutdown(([127, 0, 0, 1], 0), async move {
            shutdown_rx.recv().await;
        });
    tokio::spawn(server);
    (format!("http://{}", addr), shutdown_tx)
}
