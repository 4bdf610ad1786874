//! Item API endpoints

use api_types::item::{ItemCreated, ItemGet, ItemNew, ItemUpdate, ItemView, UnavailableSet};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::Utc;
use uuid::Uuid;

use crate::{ServerError, server::ServerState};

pub(crate) fn map_section(section: api_types::Section) -> engine::Section {
    match section {
        api_types::Section::Bedroom => engine::Section::Bedroom,
        api_types::Section::Bathroom => engine::Section::Bathroom,
        api_types::Section::Pantry => engine::Section::Pantry,
        api_types::Section::Kitchen => engine::Section::Kitchen,
        api_types::Section::Closet => engine::Section::Closet,
        api_types::Section::CleaningSupplies => engine::Section::CleaningSupplies,
        api_types::Section::Tools => engine::Section::Tools,
    }
}

pub(crate) fn map_section_api(section: engine::Section) -> api_types::Section {
    match section {
        engine::Section::Bedroom => api_types::Section::Bedroom,
        engine::Section::Bathroom => api_types::Section::Bathroom,
        engine::Section::Pantry => api_types::Section::Pantry,
        engine::Section::Kitchen => api_types::Section::Kitchen,
        engine::Section::Closet => api_types::Section::Closet,
        engine::Section::CleaningSupplies => api_types::Section::CleaningSupplies,
        engine::Section::Tools => api_types::Section::Tools,
    }
}

pub(crate) fn view(item: engine::Item) -> ItemView {
    ItemView {
        id: item.id,
        section: map_section_api(item.section),
        name: item.name,
        category: map_section_api(item.category),
        amount: item.amount,
        photo: item.photo,
        last_stashed_at: item.last_stashed_at.fixed_offset(),
        unavailable: item.unavailable,
    }
}

/// Handle requests for stashing a new item.
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<ItemNew>,
) -> Result<Json<ItemCreated>, ServerError> {
    let mut form = engine::ItemForm::new();
    form.draft_mut().name = payload.name;
    form.draft_mut().category = Some(map_section(payload.category));
    form.draft_mut().amount = payload.amount;
    form.draft_mut().photo = payload.photo;

    let id = form.submit(&state.store, Utc::now()).await?;

    Ok(Json(ItemCreated {
        id,
        section: payload.category,
    }))
}

/// Handle one-shot item reads, used to hydrate the edit form.
pub async fn get(
    State(state): State<ServerState>,
    Json(payload): Json<ItemGet>,
) -> Result<Json<ItemView>, ServerError> {
    let item = state
        .store
        .item(payload.id, map_section(payload.section))
        .await?;
    Ok(Json(view(item)))
}

/// Handle edits of an existing item.
///
/// The write always lands on the `(section, id)` address of the payload; a
/// changed category updates the field without moving the row.
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<ItemUpdate>,
) -> Result<Json<ItemView>, ServerError> {
    let section = map_section(payload.section);
    let item = state.store.item(id, section).await?;

    let mut form = engine::ItemForm::edit(&item);
    form.draft_mut().name = payload.name;
    form.draft_mut().category = Some(map_section(payload.category));
    form.draft_mut().amount = payload.amount;
    form.draft_mut().photo = payload.photo;
    form.submit(&state.store, Utc::now()).await?;

    let item = state.store.item(id, section).await?;
    Ok(Json(view(item)))
}

/// Handle the soft-delete toggle.
pub async fn set_unavailable(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UnavailableSet>,
) -> Result<StatusCode, ServerError> {
    state
        .store
        .set_unavailable(id, map_section(payload.section), payload.unavailable)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
