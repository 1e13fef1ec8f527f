use chrono::{DateTime, Local};
use thiserror::Error;

use crate::models::{DuplicateField, Person};

/// Rejections raised by the collection store
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BookError {
    #[error("A person with the same {0} already exists in the policy book")]
    Duplicate(DuplicateField),

    #[error("The specified person could not be found in the policy book")]
    NotFound,
}

/// Ordered collection of unique persons
///
/// Insertion order is the "original order" every view falls back to. No two
/// persons may share a name (ignoring case) or a policy number.
#[derive(Debug, Clone, Default)]
pub struct PolicyBook {
    persons: Vec<Person>,
    last_updated: Option<DateTime<Local>>,
}

impl PolicyBook {
    /// Creates an empty policy book
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a book from stored persons, rejecting any duplicate pair
    pub fn from_persons(persons: Vec<Person>) -> Result<Self, BookError> {
        let mut book = Self::new();
        for person in persons {
            book.add(person)?;
        }
        book.last_updated = None;
        Ok(book)
    }

    pub fn persons(&self) -> &[Person] {
        &self.persons
    }

    pub fn len(&self) -> usize {
        self.persons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.persons.is_empty()
    }

    pub fn contains(&self, person: &Person) -> bool {
        self.persons.iter().any(|p| p == person)
    }

    /// Time of the most recent add, remove, replace or clear
    pub fn last_updated(&self) -> Option<DateTime<Local>> {
        self.last_updated
    }

    /// Returns the first collision `person` would have with a stored person,
    /// skipping `except` (the person being replaced, if any)
    pub fn find_duplicate(&self, person: &Person, except: Option<&Person>) -> Option<DuplicateField> {
        self.persons
            .iter()
            .filter(|p| except != Some(*p))
            .find_map(|p| person.duplicate_field(p))
    }

    /// Appends a person
    pub fn add(&mut self, person: Person) -> Result<(), BookError> {
        if let Some(field) = self.find_duplicate(&person, None) {
            return Err(BookError::Duplicate(field));
        }
        self.persons.push(person);
        self.touch();
        Ok(())
    }

    /// Removes a person equal to `person`
    pub fn remove(&mut self, person: &Person) -> Result<(), BookError> {
        let pos = self.position(person).ok_or(BookError::NotFound)?;
        self.persons.remove(pos);
        self.touch();
        Ok(())
    }

    /// Swaps `target` for `edited` in place, keeping its position
    pub fn replace(&mut self, target: &Person, edited: Person) -> Result<(), BookError> {
        let pos = self.position(target).ok_or(BookError::NotFound)?;
        if let Some(field) = self.find_duplicate(&edited, Some(target)) {
            return Err(BookError::Duplicate(field));
        }
        self.persons[pos] = edited;
        self.touch();
        Ok(())
    }

    /// Removes every person
    pub fn clear(&mut self) {
        self.persons.clear();
        self.touch();
    }

    fn position(&self, person: &Person) -> Option<usize> {
        self.persons.iter().position(|p| p == person)
    }

    // Never moves backwards, even if the wall clock does
    fn touch(&mut self) {
        let now = Local::now();
        self.last_updated = Some(match self.last_updated {
            Some(previous) if previous > now => previous,
            _ => now,
        });
    }
}

/// Books compare by contents; the timestamp is bookkeeping
impl PartialEq for PolicyBook {
    fn eq(&self, other: &Self) -> bool {
        self.persons == other.persons
    }
}

impl Eq for PolicyBook {}
