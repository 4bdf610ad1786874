//! The item form: draft staging, validation and submit routing.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::{Item, ResultStore, Section, Store, StoreError};

/// Where a photo comes from; the choice is the user's, via a modal prompt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PhotoSource {
    Camera,
    Gallery,
}

/// Device media collaborator (camera capture / gallery picker).
///
/// Both paths are gated by a runtime permission check that must succeed
/// before either is invoked.
pub trait PhotoPicker {
    fn permissions_granted(&self) -> bool;
    /// Returns the picked photo URI, or `None` when the user cancels.
    fn pick(&mut self, source: PhotoSource) -> Option<String>;
}

/// In-progress editable fields of a single item.
///
/// Staging is plain field mutation; any partial state is representable and
/// nothing is validated until submit.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ItemDraft {
    pub name: String,
    pub category: Option<Section>,
    pub amount: String,
    pub photo: Option<String>,
}

/// Fixed at form-open time, never switched afterwards.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit { id: Uuid, section: Section },
}

/// Controller for the add/edit item form.
#[derive(Clone, Debug)]
pub struct ItemForm {
    mode: FormMode,
    draft: ItemDraft,
}

impl ItemForm {
    /// Open the form for a brand new item.
    pub fn new() -> Self {
        Self {
            mode: FormMode::Create,
            draft: ItemDraft::default(),
        }
    }

    /// Open the form over an existing item, prefilled with its fields.
    ///
    /// The edit address is the item's *partition* (`section`), not its
    /// submitted category, so a later submit lands on the row it came from.
    pub fn edit(item: &Item) -> Self {
        Self {
            mode: FormMode::Edit {
                id: item.id,
                section: item.section,
            },
            draft: ItemDraft {
                name: item.name.clone(),
                category: Some(item.category),
                amount: item.amount.clone(),
                photo: item.photo.clone(),
            },
        }
    }

    pub fn mode(&self) -> FormMode {
        self.mode
    }

    pub fn draft(&self) -> &ItemDraft {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut ItemDraft {
        &mut self.draft
    }

    /// Let the user attach a photo from the camera or the gallery.
    ///
    /// Returns `Ok(false)` when the user cancels; the draft is untouched.
    /// The picked URI is staged verbatim, there is no upload step.
    pub fn pick_photo(
        &mut self,
        picker: &mut dyn PhotoPicker,
        source: PhotoSource,
    ) -> ResultStore<bool> {
        if !picker.permissions_granted() {
            return Err(StoreError::Validation(
                "camera and media library permissions".to_string(),
            ));
        }
        match picker.pick(source) {
            Some(uri) => {
                self.draft.photo = Some(uri);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn validated(&self) -> ResultStore<(&str, Section, &str)> {
        if self.draft.name.is_empty() {
            return Err(StoreError::Validation("name".to_string()));
        }
        let Some(category) = self.draft.category else {
            return Err(StoreError::Validation("category".to_string()));
        };
        if self.draft.amount.is_empty() {
            return Err(StoreError::Validation("amount".to_string()));
        }
        Ok((&self.draft.name, category, &self.draft.amount))
    }

    /// Validate the draft and write it to the store.
    ///
    /// `last_stashed_at` is stamped with `now` unconditionally, also on edit.
    /// In `Edit` mode the write targets the original `(section, id)` address;
    /// a category change updates the field but never moves the row. On any
    /// failure the draft is retained, no partial write happens.
    pub async fn submit(&self, store: &Store, now: DateTime<Utc>) -> ResultStore<Uuid> {
        let (name, category, amount) = self.validated()?;

        match self.mode {
            FormMode::Edit { id, section } => {
                store
                    .update_item(
                        id,
                        section,
                        name,
                        category,
                        amount,
                        self.draft.photo.as_deref(),
                        now,
                    )
                    .await?;
                Ok(id)
            }
            FormMode::Create => {
                store
                    .create_item(name, category, amount, self.draft.photo.as_deref(), now)
                    .await
            }
        }
    }
}

impl Default for ItemForm {
    fn default() -> Self {
        Self::new()
    }
}
