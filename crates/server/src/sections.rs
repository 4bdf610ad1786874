//! Section and Collection listing endpoints

use api_types::item::{CollectionItems, ItemListResponse, SectionItems};
use axum::{Json, extract::State};

use crate::{
    ServerError,
    items::{map_section, view},
    server::ServerState,
};

/// Available items of one section.
pub async fn list(
    State(state): State<ServerState>,
    Json(payload): Json<SectionItems>,
) -> Result<Json<ItemListResponse>, ServerError> {
    let items = state
        .store
        .list_section(map_section(payload.section))
        .await?;
    Ok(Json(ItemListResponse {
        items: items.into_iter().map(view).collect(),
    }))
}

/// Everything across all sections, unavailable items included.
pub async fn collection(
    State(state): State<ServerState>,
    Json(payload): Json<CollectionItems>,
) -> Result<Json<ItemListResponse>, ServerError> {
    let mut items = state.store.list_collection().await?;
    if let Some(query) = payload.query.as_deref() {
        items = engine::search_by_name(&items, query);
    }
    Ok(Json(ItemListResponse {
        items: items.into_iter().map(view).collect(),
    }))
}
