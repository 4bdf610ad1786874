//! The module contains the `Item` struct and its storage entity.

use chrono::{DateTime, Utc};
use sea_orm::entity::{ActiveValue, prelude::*};
use uuid::Uuid;

use crate::{Section, StoreError};

/// A stashed household item.
///
/// An item always lives under exactly one [`Section`] partition. `section` is
/// the partition the row is stored under and is part of the storage address;
/// `category` is the field the user last submitted. The two start out equal
/// and only diverge when an edit changes the category, because updates never
/// move a row between partitions.
#[derive(Clone, Debug, PartialEq)]
pub struct Item {
    /// Stable identifier for this item.
    ///
    /// Generated once at creation and persisted, so the item can be renamed
    /// without breaking references.
    pub id: Uuid,
    pub section: Section,
    pub name: String,
    pub category: Section,
    /// Quantity as the user typed it. No unit, not parsed.
    pub amount: String,
    /// Opaque photo URI, stored verbatim. `None` means no photo.
    pub photo: Option<String>,
    pub last_stashed_at: DateTime<Utc>,
    /// Soft-delete marker: hidden from section views, kept in the Collection.
    pub unavailable: bool,
}

impl Item {
    pub fn new(
        name: String,
        category: Section,
        amount: String,
        photo: Option<String>,
        last_stashed_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            section: category,
            name,
            category,
            amount,
            photo,
            last_stashed_at,
            unavailable: false,
        }
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "items")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub section: String,
    pub name: String,
    pub category: String,
    pub amount: String,
    pub photo: Option<String>,
    pub last_stashed_at: DateTimeUtc,
    pub unavailable: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<&Item> for ActiveModel {
    fn from(value: &Item) -> Self {
        Self {
            id: ActiveValue::Set(value.id.to_string()),
            section: ActiveValue::Set(value.section.as_str().to_string()),
            name: ActiveValue::Set(value.name.clone()),
            category: ActiveValue::Set(value.category.as_str().to_string()),
            amount: ActiveValue::Set(value.amount.clone()),
            photo: ActiveValue::Set(value.photo.clone()),
            last_stashed_at: ActiveValue::Set(value.last_stashed_at),
            unavailable: ActiveValue::Set(value.unavailable),
        }
    }
}

impl TryFrom<Model> for Item {
    type Error = StoreError;

    fn try_from(value: Model) -> Result<Self, Self::Error> {
        let id = Uuid::parse_str(&value.id)
            .map_err(|_| StoreError::Validation(format!("invalid item id: {}", value.id)))?;
        Ok(Item {
            id,
            section: Section::try_from(value.section.as_str())?,
            name: value.name,
            category: Section::try_from(value.category.as_str())?,
            amount: value.amount,
            photo: value.photo,
            last_stashed_at: value.last_stashed_at,
            unavailable: value.unavailable,
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;

    fn item() -> Item {
        Item::new(
            String::from("Paper Towels"),
            Section::Pantry,
            String::from("3"),
            None,
            Utc.timestamp_opt(0, 0).unwrap(),
        )
    }

    #[test]
    fn new_item_is_available_and_stored_under_its_category() {
        let item = item();
        assert_eq!(item.section, Section::Pantry);
        assert_eq!(item.category, Section::Pantry);
        assert!(!item.unavailable);
    }

    #[test]
    fn model_round_trip() {
        let item = item();
        let active = ActiveModel::from(&item);
        let model = Model {
            id: active.id.unwrap(),
            section: active.section.unwrap(),
            name: active.name.unwrap(),
            category: active.category.unwrap(),
            amount: active.amount.unwrap(),
            photo: active.photo.unwrap(),
            last_stashed_at: active.last_stashed_at.unwrap(),
            unavailable: active.unavailable.unwrap(),
        };
        assert_eq!(Item::try_from(model).unwrap(), item);
    }

    #[test]
    fn bad_stored_id_is_rejected() {
        let mut model = Model {
            id: "not-a-uuid".to_string(),
            section: "Pantry".to_string(),
            name: "Paper Towels".to_string(),
            category: "Pantry".to_string(),
            amount: "3".to_string(),
            photo: None,
            last_stashed_at: Utc.timestamp_opt(0, 0).unwrap(),
            unavailable: false,
        };
        assert!(Item::try_from(model.clone()).is_err());

        model.id = Uuid::new_v4().to_string();
        model.section = "Garage".to_string();
        assert_eq!(
            Item::try_from(model).unwrap_err(),
            StoreError::UnknownSection("Garage".to_string())
        );
    }
}
