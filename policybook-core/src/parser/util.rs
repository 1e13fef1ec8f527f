use chrono::NaiveDate;
use std::collections::BTreeSet;

use super::ParseError;
use crate::commands::Index;
use crate::models::{Tag, ValidationError};
use crate::view::SortOrder;

fn is_unsigned_integer(raw: &str) -> bool {
    !raw.is_empty() && raw.chars().all(|c| c.is_ascii_digit())
}

/// Parses a one-based index; signs, blanks and zero are rejected
pub fn parse_index(raw: &str) -> Result<Index, ParseError> {
    let raw = raw.trim();
    if !is_unsigned_integer(raw) {
        return Err(ParseError::InvalidIndex);
    }
    raw.parse::<usize>()
        .ok()
        .and_then(Index::from_one_based)
        .ok_or(ParseError::InvalidIndex)
}

/// Parses an ISO `YYYY-MM-DD` date
pub fn parse_date(raw: &str) -> Result<NaiveDate, ParseError> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_err(|_| ParseError::InvalidDate)
}

pub fn parse_sort_order(raw: &str) -> Result<SortOrder, ParseError> {
    raw.parse::<SortOrder>()
        .map_err(|_| ParseError::InvalidSortOrder)
}

pub fn parse_days(raw: &str) -> Result<u32, ParseError> {
    let raw = raw.trim();
    if !is_unsigned_integer(raw) {
        return Err(ParseError::InvalidDays);
    }
    raw.parse::<u32>().map_err(|_| ParseError::InvalidDays)
}

pub fn parse_tags(values: &[String]) -> Result<BTreeSet<Tag>, ValidationError> {
    values.iter().map(|v| Tag::new(v)).collect()
}

/// `None` when no `t/` was given; a single empty `t/` clears all tags
pub fn parse_tags_for_edit(values: &[String]) -> Result<Option<BTreeSet<Tag>>, ValidationError> {
    match values {
        [] => Ok(None),
        [only] if only.is_empty() => Ok(Some(BTreeSet::new())),
        _ => parse_tags(values).map(Some),
    }
}
