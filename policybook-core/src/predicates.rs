//! Person predicates used by `find` and the renewal filters
//!
//! Each criterion tests a single field. A [`FindPersonsPredicate`] holds at most
//! one criterion per field and matches when any of them does.

use chrono::NaiveDate;
use std::fmt;
use thiserror::Error;

use crate::models::{Person, PolicyType};

/// Anything that can accept or reject a person
pub trait PersonPredicate {
    fn test(&self, person: &Person) -> bool;
}

/// A single-field test; keywords match case-insensitively as substrings
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Criterion {
    NameContains(Vec<String>),
    PhoneContains(Vec<String>),
    EmailContains(Vec<String>),
    AddressContains(Vec<String>),
    PolicyContains(Vec<String>),
    TagContains(Vec<String>),
    PolicyTypeIs(Vec<PolicyType>),
}

impl Criterion {
    fn field(&self) -> &'static str {
        match self {
            Criterion::NameContains(_) => "name",
            Criterion::PhoneContains(_) => "phone",
            Criterion::EmailContains(_) => "email",
            Criterion::AddressContains(_) => "address",
            Criterion::PolicyContains(_) => "policy",
            Criterion::TagContains(_) => "tag",
            Criterion::PolicyTypeIs(_) => "policy type",
        }
    }
}

fn contains_any(haystack: &str, keywords: &[String]) -> bool {
    let haystack = haystack.to_lowercase();
    keywords
        .iter()
        .any(|keyword| haystack.contains(&keyword.to_lowercase()))
}

impl PersonPredicate for Criterion {
    fn test(&self, person: &Person) -> bool {
        match self {
            Criterion::NameContains(keywords) => contains_any(person.name().as_str(), keywords),
            Criterion::PhoneContains(numbers) => contains_any(person.phone().as_str(), numbers),
            Criterion::EmailContains(keywords) => contains_any(person.email().as_str(), keywords),
            Criterion::AddressContains(keywords) => {
                contains_any(person.address().as_str(), keywords)
            }
            Criterion::PolicyContains(numbers) => {
                contains_any(person.policy().number().as_str(), numbers)
            }
            Criterion::TagContains(keywords) => person
                .tags()
                .iter()
                .any(|tag| contains_any(tag.as_str(), keywords)),
            Criterion::PolicyTypeIs(types) => types.contains(&person.policy().policy_type()),
        }
    }
}

/// OR-combination of per-field criteria
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FindPersonsPredicate {
    criteria: Vec<Criterion>,
}

impl FindPersonsPredicate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_names<I: IntoIterator<Item = String>>(self, keywords: I) -> Self {
        self.with(Criterion::NameContains(keywords.into_iter().collect()))
    }

    pub fn with_phones<I: IntoIterator<Item = String>>(self, numbers: I) -> Self {
        self.with(Criterion::PhoneContains(numbers.into_iter().collect()))
    }

    pub fn with_emails<I: IntoIterator<Item = String>>(self, keywords: I) -> Self {
        self.with(Criterion::EmailContains(keywords.into_iter().collect()))
    }

    pub fn with_addresses<I: IntoIterator<Item = String>>(self, keywords: I) -> Self {
        self.with(Criterion::AddressContains(keywords.into_iter().collect()))
    }

    pub fn with_policies<I: IntoIterator<Item = String>>(self, numbers: I) -> Self {
        self.with(Criterion::PolicyContains(numbers.into_iter().collect()))
    }

    pub fn with_tags<I: IntoIterator<Item = String>>(self, keywords: I) -> Self {
        self.with(Criterion::TagContains(keywords.into_iter().collect()))
    }

    pub fn with_policy_types<I: IntoIterator<Item = PolicyType>>(self, types: I) -> Self {
        self.with(Criterion::PolicyTypeIs(types.into_iter().collect()))
    }

    /// Sets `criterion`, replacing any existing criterion on the same field.
    /// An empty keyword list leaves the field unset.
    pub fn with(mut self, criterion: Criterion) -> Self {
        let is_empty = match &criterion {
            Criterion::NameContains(k)
            | Criterion::PhoneContains(k)
            | Criterion::EmailContains(k)
            | Criterion::AddressContains(k)
            | Criterion::PolicyContains(k)
            | Criterion::TagContains(k) => k.is_empty(),
            Criterion::PolicyTypeIs(t) => t.is_empty(),
        };
        self.criteria.retain(|c| c.field() != criterion.field());
        if !is_empty {
            self.criteria.push(criterion);
        }
        self
    }

    pub fn criteria(&self) -> &[Criterion] {
        &self.criteria
    }

    /// Returns true if at least one criterion is set
    pub fn is_any_criterion_set(&self) -> bool {
        !self.criteria.is_empty()
    }
}

impl PersonPredicate for FindPersonsPredicate {
    fn test(&self, person: &Person) -> bool {
        self.criteria.iter().any(|c| c.test(person))
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Start date must not be after end date.")]
pub struct InvalidDateRange;

/// Inclusive range of calendar dates, start never after end
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, InvalidDateRange> {
        if start > end {
            return Err(InvalidDateRange);
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} and {}", self.start, self.end)
    }
}

/// Selects persons whose policy renews inside a date range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenewalDateInRange(pub DateRange);

impl PersonPredicate for RenewalDateInRange {
    fn test(&self, person: &Person) -> bool {
        self.0.contains(person.policy().renewal_date().date())
    }
}
