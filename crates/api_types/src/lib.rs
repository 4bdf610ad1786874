use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Wire-level section name.
///
/// Serialized as the display name the app shows ("Cleaning Supplies" keeps
/// its space).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Section {
    Bedroom,
    Bathroom,
    Pantry,
    Kitchen,
    Closet,
    #[serde(rename = "Cleaning Supplies")]
    CleaningSupplies,
    Tools,
}

pub mod item {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ItemNew {
        pub name: String,
        pub category: Section,
        pub amount: String,
        pub photo: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ItemCreated {
        /// Item id (UUID).
        ///
        /// This is serialized as a string in JSON.
        pub id: Uuid,
        pub section: Section,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ItemGet {
        pub id: Uuid,
        pub section: Section,
    }

    /// Update payload for an existing item.
    ///
    /// `section` is the partition the item was created under; a different
    /// `category` updates the field without moving the row.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct ItemUpdate {
        pub section: Section,
        pub name: String,
        pub category: Section,
        pub amount: String,
        pub photo: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct UnavailableSet {
        pub section: Section,
        pub unavailable: bool,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ItemView {
        pub id: Uuid,
        pub section: Section,
        pub name: String,
        pub category: Section,
        pub amount: String,
        pub photo: Option<String>,
        pub last_stashed_at: DateTime<FixedOffset>,
        pub unavailable: bool,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct SectionItems {
        pub section: Section,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct CollectionItems {
        /// Optional case-insensitive name filter.
        pub query: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ItemListResponse {
        pub items: Vec<ItemView>,
    }
}

pub mod chat {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ChatAsk {
        pub message: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ChatReply {
        pub reply: String,
    }
}

pub mod scan {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ScanNew {
        pub kind: String,
        pub data: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ScanSaved {
        pub id: Uuid,
    }
}
