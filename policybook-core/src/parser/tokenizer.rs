//! Splits the arguments of a command line into a preamble and prefixed values

use std::collections::HashMap;

use super::syntax::Prefix;
use super::ParseError;

/// Values for every prefix found in an argument string, in order of appearance
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArgumentMultimap {
    preamble: String,
    values: HashMap<Prefix, Vec<String>>,
}

impl ArgumentMultimap {
    /// Text before the first prefix, trimmed
    pub fn preamble(&self) -> &str {
        &self.preamble
    }

    /// Last value given for `prefix`
    pub fn value(&self, prefix: Prefix) -> Option<&str> {
        self.values
            .get(&prefix)
            .and_then(|values| values.last())
            .map(String::as_str)
    }

    pub fn all_values(&self, prefix: Prefix) -> &[String] {
        self.values.get(&prefix).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn is_present(&self, prefix: Prefix) -> bool {
        self.values.contains_key(&prefix)
    }

    pub fn are_all_present(&self, prefixes: &[Prefix]) -> bool {
        prefixes.iter().all(|p| self.is_present(*p))
    }

    /// Rejects any of `prefixes` that was given more than once
    pub fn verify_no_duplicate_prefixes_for(&self, prefixes: &[Prefix]) -> Result<(), ParseError> {
        let duplicated: Vec<&str> = prefixes
            .iter()
            .filter(|p| self.all_values(**p).len() > 1)
            .map(|p| p.as_str())
            .collect();
        if duplicated.is_empty() {
            Ok(())
        } else {
            Err(ParseError::DuplicatePrefixes(duplicated.join(" ")))
        }
    }

    fn put(&mut self, prefix: Prefix, value: &str) {
        self.values
            .entry(prefix)
            .or_default()
            .push(value.trim().to_string());
    }
}

/// Tokenizes `args` against `prefixes`
///
/// A prefix only counts when it starts the string or follows whitespace, so
/// `t/` inside `pt/` or a URL is not picked up.
pub fn tokenize(args: &str, prefixes: &[Prefix]) -> ArgumentMultimap {
    let args = format!(" {}", args);
    let mut positions: Vec<(usize, Prefix)> = Vec::new();

    for prefix in prefixes {
        let needle = format!(" {}", prefix.as_str());
        let mut from = 0;
        while let Some(found) = args[from..].find(&needle) {
            let at = from + found + 1;
            if !positions.iter().any(|(pos, _)| *pos == at) {
                positions.push((at, *prefix));
            }
            from = at;
        }
    }
    positions.sort_by_key(|(at, _)| *at);

    let mut map = ArgumentMultimap::default();
    let preamble_end = positions.first().map(|(at, _)| *at).unwrap_or(args.len());
    map.preamble = args[..preamble_end].trim().to_string();

    for (i, (at, prefix)) in positions.iter().enumerate() {
        let start = at + prefix.as_str().len();
        let end = positions
            .get(i + 1)
            .map(|(next, _)| *next)
            .unwrap_or(args.len());
        map.put(*prefix, &args[start..end]);
    }
    map
}
