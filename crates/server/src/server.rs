use axum::{
    Router,
    routing::{get, post},
};

use std::sync::Arc;

use crate::{chat, items, scans, sections};
use assistant::Assistant;
use engine::Store;

#[derive(Clone)]
pub struct ServerState {
    pub store: Arc<Store>,
    pub assistant: Option<Arc<Assistant>>,
}

fn router(state: ServerState) -> Router {
    Router::new()
        .route("/items", post(items::create))
        .route("/items/get", post(items::get))
        .route("/items/{id}", axum::routing::patch(items::update))
        .route("/items/{id}/unavailable", post(items::set_unavailable))
        .route("/section/items", get(sections::list))
        .route("/collection/items", get(sections::collection))
        .route("/scans", post(scans::create))
        .route("/assistant", post(chat::ask))
        .with_state(state)
}

pub async fn run(store: Store, assistant: Option<Assistant>) {
    let listener = match tokio::net::TcpListener::bind("127.0.0.1:3000").await {
        Ok(listener) => listener,
        Err(err) => {
            tracing::error!("failed to bind server listener: {err}");
            return;
        }
    };
    if let Err(err) = run_with_listener(store, assistant, listener).await {
        tracing::error!("server failed: {err}");
    }
}

pub async fn run_with_listener(
    store: Store,
    assistant: Option<Assistant>,
    listener: tokio::net::TcpListener,
) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!("Server listening on {}", addr);

    let state = ServerState {
        store: Arc::new(store),
        assistant: assistant.map(Arc::new),
    };

    axum::serve(listener, router(state)).await
}

pub fn spawn_with_listener(
    store: Store,
    assistant: Option<Assistant>,
    listener: tokio::net::TcpListener,
) -> Result<std::net::SocketAddr, std::io::Error> {
    let addr = listener.local_addr()?;

    tokio::spawn(async move {
        if let Err(err) = run_with_listener(store, assistant, listener).await {
            tracing::error!("server failed: {err}");
        }
    });

    Ok(addr)
}
