//! `${name}` placeholder substitution
//!
//! Deliberately minimal: named placeholders only, no sections or
//! escaping. A placeholder the value map does not cover is a hard
//! error; supplied values the template never references are ignored.

use std::collections::{BTreeMap, BTreeSet};

use regex::Regex;

use crate::{BubbletexError, Result};

fn placeholder_pattern() -> Regex {
    Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)\}").expect("placeholder pattern is valid")
}

/// Replace every `${name}` in `text` with its value.
///
/// Fails with [`BubbletexError::UndefinedPlaceholder`] on the first
/// placeholder (in text order) that has no supplied value.
pub fn substitute(text: &str, values: &BTreeMap<String, String>) -> Result<String> {
    let mut missing: Option<String> = None;
    let filled = placeholder_pattern().replace_all(text, |caps: &regex::Captures| {
        let name = &caps[1];
        match values.get(name) {
            Some(value) => value.clone(),
            None => {
                missing.get_or_insert_with(|| name.to_string());
                String::new()
            }
        }
    });
    match missing {
        Some(name) => Err(BubbletexError::UndefinedPlaceholder { name }),
        None => Ok(filled.into_owned()),
    }
}

/// Distinct placeholder names referenced by a template.
pub fn placeholders(text: &str) -> BTreeSet<String> {
    placeholder_pattern()
        .captures_iter(text)
        .map(|caps| caps[1].to_string())
        .collect()
}
