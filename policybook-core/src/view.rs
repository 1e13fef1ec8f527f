//! Filtered and sorted projections over the policy book
//!
//! A view stores only a filter and a sort order. Its contents are recomputed
//! from the book every time they are read, so a view can never go stale.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::models::Person;
use crate::predicates::{DateRange, FindPersonsPredicate, PersonPredicate, RenewalDateInRange};

/// Which projection a command acted on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    Persons,
    Renewals,
}

/// The predicate a view applies
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum PersonFilter {
    #[default]
    All,
    Matching(FindPersonsPredicate),
    RenewingBetween(DateRange),
}

impl PersonPredicate for PersonFilter {
    fn test(&self, person: &Person) -> bool {
        match self {
            PersonFilter::All => true,
            PersonFilter::Matching(predicate) => predicate.test(person),
            PersonFilter::RenewingBetween(range) => RenewalDateInRange(*range).test(person),
        }
    }
}

/// Named orderings available to `sort`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersonComparator {
    /// By full name ignoring case, then by exact spelling
    Name,
    /// By alphabetically first tag, untagged persons last
    Tag,
    /// Soonest renewal first
    RenewalDate,
}

impl PersonComparator {
    pub fn compare(&self, a: &Person, b: &Person) -> Ordering {
        match self {
            PersonComparator::Name => {
                let (x, y) = (a.name().as_str(), b.name().as_str());
                x.to_lowercase()
                    .cmp(&y.to_lowercase())
                    .then_with(|| x.cmp(y))
            }
            PersonComparator::Tag => match (first_tag(a), first_tag(b)) {
                (Some(x), Some(y)) => x.cmp(&y),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            },
            PersonComparator::RenewalDate => a
                .policy()
                .renewal_date()
                .cmp(&b.policy().renewal_date()),
        }
    }
}

fn first_tag(person: &Person) -> Option<String> {
    person.tags().iter().map(|t| t.as_str().to_lowercase()).min()
}

/// Ordering of a view; `OriginalOrder` is the book's insertion order
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    #[default]
    OriginalOrder,
    By(PersonComparator),
}

impl SortOrder {
    pub const MESSAGE_CONSTRAINTS: &'static str = "Sort order should be one of: name, tag, date, reset";
}

impl FromStr for SortOrder {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "name" => Ok(SortOrder::By(PersonComparator::Name)),
            "tag" => Ok(SortOrder::By(PersonComparator::Tag)),
            "date" => Ok(SortOrder::By(PersonComparator::RenewalDate)),
            "reset" => Ok(SortOrder::OriginalOrder),
            _ => Err(Self::MESSAGE_CONSTRAINTS),
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortOrder::OriginalOrder => write!(f, "original order"),
            SortOrder::By(PersonComparator::Name) => write!(f, "name"),
            SortOrder::By(PersonComparator::Tag) => write!(f, "tag"),
            SortOrder::By(PersonComparator::RenewalDate) => write!(f, "renewal date"),
        }
    }
}

/// Filter and sort order of one view
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewState {
    filter: PersonFilter,
    sort: SortOrder,
}

impl ViewState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filter(&self) -> &PersonFilter {
        &self.filter
    }

    pub fn sort(&self) -> SortOrder {
        self.sort
    }

    /// Replaces the filter; the sort order is kept
    pub fn set_filter(&mut self, filter: PersonFilter) {
        self.filter = filter;
    }

    /// Replaces the sort order; the filter is kept
    pub fn set_sort(&mut self, sort: SortOrder) {
        self.sort = sort;
    }

    /// Back to every person in original order
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Projects `persons` through the filter, then a stable sort
    pub fn apply<'a>(&self, persons: &'a [Person]) -> Vec<&'a Person> {
        let mut shown: Vec<&Person> = persons.iter().filter(|p| self.filter.test(p)).collect();
        if let SortOrder::By(comparator) = self.sort {
            shown.sort_by(|a, b| comparator.compare(a, b));
        }
        shown
    }
}
