use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;
use warp::Filter;

/// Echo the request text upper-cased and record every JSON body.
pub async fn spawn_mock_runorm() -> (String, Arc<Mutex<Vec<Value>>>, mpsc::Sender<()>) {
    let (shutdown_tx, mut shutdown_rx) = mpsc::channel(1);
    let seen = Arc::new(Mutex::new(Vec::new()));
    let record = seen.clone();
    let route = warp::post()
        .and(warp::path("v1").and(warp::path("preprocess")))
        .and(warp::body::json())
        .map(move |body: Value| {
            let text = body["text"].as_str().unwrap_or_default().to_uppercase();
            record.lock().unwrap().push(body);
            warp::reply::json(&json!({ "text": text }))
        });

    let (addr, server) =
        warp::serve(route).bind_with_graceful_shutdown(([127, 0, 0, 1], 0), async move {
            shutdown_rx.recv().await;
        });
    tokio::spawn(server);
    let url = format!("http://{}", addr);
    (url, seen, shutdown_tx)
}
