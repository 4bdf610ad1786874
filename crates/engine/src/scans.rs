//! Append-only log of scanned barcodes.

use chrono::{DateTime, Utc};
use sea_orm::entity::{ActiveValue, prelude::*};
use uuid::Uuid;

use crate::StoreError;

/// One scanned barcode.
#[derive(Clone, Debug, PartialEq)]
pub struct ScannedCode {
    pub id: Uuid,
    /// Barcode symbology reported by the scanner (e.g. `ean13`).
    pub kind: String,
    pub data: String,
    pub scanned_at: DateTime<Utc>,
}

impl ScannedCode {
    pub fn new(kind: String, data: String, scanned_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            data,
            scanned_at,
        }
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "scanned_codes")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub kind: String,
    pub data: String,
    pub scanned_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<&ScannedCode> for ActiveModel {
    fn from(value: &ScannedCode) -> Self {
        Self {
            id: ActiveValue::Set(value.id.to_string()),
            kind: ActiveValue::Set(value.kind.clone()),
            data: ActiveValue::Set(value.data.clone()),
            scanned_at: ActiveValue::Set(value.scanned_at),
        }
    }
}

impl TryFrom<Model> for ScannedCode {
    type Error = StoreError;

    fn try_from(value: Model) -> Result<Self, Self::Error> {
        let id = Uuid::parse_str(&value.id)
            .map_err(|_| StoreError::Validation(format!("invalid scan id: {}", value.id)))?;
        Ok(ScannedCode {
            id,
            kind: value.kind,
            data: value.data,
            scanned_at: value.scanned_at,
        })
    }
}
