use serde::{Deserialize, Serialize};

use crate::StoreError;

/// Room-like grouping under which items are stored and queried.
///
/// The section doubles as the storage partition key: an item row lives under
/// exactly one section, and that address does not change after creation (see
/// `Store::update_item`). The set is fixed; there is no user-defined section.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
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

impl Section {
    /// Every section, in the order the home screen lists them.
    pub const ALL: [Section; 7] = [
        Section::Bedroom,
        Section::Bathroom,
        Section::Pantry,
        Section::Kitchen,
        Section::Closet,
        Section::CleaningSupplies,
        Section::Tools,
    ];

    /// Canonical section name, also used as the stored partition key.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Section::Bedroom => "Bedroom",
            Section::Bathroom => "Bathroom",
            Section::Pantry => "Pantry",
            Section::Kitchen => "Kitchen",
            Section::Closet => "Closet",
            Section::CleaningSupplies => "Cleaning Supplies",
            Section::Tools => "Tools",
        }
    }
}

impl core::fmt::Display for Section {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for Section {
    type Error = StoreError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim() {
            "Bedroom" => Ok(Section::Bedroom),
            "Bathroom" => Ok(Section::Bathroom),
            "Pantry" => Ok(Section::Pantry),
            "Kitchen" => Ok(Section::Kitchen),
            "Closet" => Ok(Section::Closet),
            "Cleaning Supplies" => Ok(Section::CleaningSupplies),
            "Tools" => Ok(Section::Tools),
            other => Err(StoreError::UnknownSection(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn as_str_round_trips() {
        for section in Section::ALL {
            assert_eq!(Section::try_from(section.as_str()).unwrap(), section);
        }
    }

    #[test]
    fn unknown_name_is_rejected() {
        let err = Section::try_from("Garage").unwrap_err();
        assert_eq!(err, StoreError::UnknownSection("Garage".to_string()));
    }

    #[test]
    fn serde_uses_display_names() {
        let json = serde_json::to_string(&Section::CleaningSupplies).unwrap();
        assert_eq!(json, "\"Cleaning Supplies\"");
    }
}
