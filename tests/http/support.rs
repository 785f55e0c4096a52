use std::sync::Arc;

use lamp_control::{http, InMemoryLampStore, LampService};

/// Bind to port 0 and return the base url.
pub async fn start_server() -> String {
    let service = Arc::new(LampService::new(InMemoryLampStore::new()));
    let app = http::router(service);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}
