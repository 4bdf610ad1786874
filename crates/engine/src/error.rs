//! The module contains the errors the item store can throw.
//!
//! The errors are:
//!
//! - [`Validation`] thrown when a form is submitted with a missing field.
//! - [`KeyNotFound`] thrown when a `(section, id)` address does not resolve.
//! - [`UnknownSection`] thrown when a section name is not one of the fixed set.
//!
//!  [`Validation`]: StoreError::Validation
//!  [`KeyNotFound`]: StoreError::KeyNotFound
//!  [`UnknownSection`]: StoreError::UnknownSection
use sea_orm::DbErr;
use thiserror::Error;

/// Item store custom errors.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Missing field: {0}")]
    Validation(String),
    #[error("\"{0}\" key not found!")]
    KeyNotFound(String),
    #[error("Unknown section: {0}")]
    UnknownSection(String),
    #[error(transparent)]
    Database(#[from] DbErr),
}

impl PartialEq for StoreError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Validation(a), Self::Validation(b)) => a == b,
            (Self::KeyNotFound(a), Self::KeyNotFound(b)) => a == b,
            (Self::UnknownSection(a), Self::UnknownSection(b)) => a == b,
            (Self::Database(a), Self::Database(b)) => a.to_string() == b.to_string(),
            _ => false,
        }
    }
}
