//! Entity model for the policy book
//!
//! Every field of a [`Person`] is an immutable value type that validates its
//! raw text on construction. A rejected value yields a [`ValidationError`]
//! carrying the fixed constraint description for that field.

mod fields;
mod person;
mod policy;

pub use fields::{Address, Email, Name, Note, Phone, PolicyNumber, Tag};
pub use person::{DuplicateField, Person};
pub use policy::{Policy, PolicyType, RenewalDate, RENEWAL_DATE_FORMAT};

use thiserror::Error;

/// A raw field value did not satisfy its format constraints
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct ValidationError {
    message: &'static str,
}

impl ValidationError {
    pub fn new(message: &'static str) -> Self {
        Self { message }
    }

    /// The constraint description of the rejected field
    pub fn message(&self) -> &'static str {
        self.message
    }
}
