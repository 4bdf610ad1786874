use axum::{Json, http::StatusCode, response::IntoResponse};
use engine::StoreError;

use serde::Serialize;
pub use server::{run, run_with_listener, spawn_with_listener};

mod chat;
mod items;
mod scans;
mod sections;
mod server;

pub mod types {
    pub mod chat {
        pub use api_types::chat::{ChatAsk, ChatReply};
    }

    pub mod item {
        pub use api_types::item::{
            CollectionItems, ItemCreated, ItemGet, ItemListResponse, ItemNew, ItemUpdate,
            ItemView, SectionItems, UnavailableSet,
        };
    }

    pub mod scan {
        pub use api_types::scan::{ScanNew, ScanSaved};
    }
}

pub enum ServerError {
    Store(StoreError),
    Generic(String),
}

#[derive(Serialize)]
struct Error {
    error: String,
}

fn status_for_store_error(err: &StoreError) -> StatusCode {
    match err {
        StoreError::KeyNotFound(_) => StatusCode::NOT_FOUND,
        StoreError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        StoreError::Validation(_) | StoreError::UnknownSection(_) => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
    }
}

fn message_for_store_error(err: StoreError) -> String {
    match err {
        StoreError::Database(db_err) => {
            tracing::error!("database error: {db_err}");
            "internal server error".to_string()
        }
        other => other.to_string(),
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> axum::response::Response {
        let (status, error) = match self {
            ServerError::Store(err) => (status_for_store_error(&err), message_for_store_error(err)),
            ServerError::Generic(err) => (StatusCode::BAD_REQUEST, err),
        };

        (status, Json(Error { error })).into_response()
    }
}

impl From<StoreError> for ServerError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_not_found_maps_to_404() {
        let res = ServerError::from(StoreError::KeyNotFound("x".to_string())).into_response();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn store_validation_maps_to_422() {
        let res = ServerError::from(StoreError::Validation("name".to_string())).into_response();
        assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn unknown_section_maps_to_422() {
        let res = ServerError::from(StoreError::UnknownSection("Garage".to_string()))
            .into_response();
        assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn generic_maps_to_400() {
        let res = ServerError::Generic("bad".to_string()).into_response();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }
}
