use std::collections::BTreeMap;
use std::ops::Bound;

use crate::model::{Entry, EntryKey};

/// Shortest normalized input, in characters, that may produce a suggestion.
pub const MIN_SUGGESTION_CHARS: usize = 4;

/// Returns the display name of the single remaining entry whose key starts
/// with `normalized_input`.
///
/// Yields nothing when the input is shorter than [`MIN_SUGGESTION_CHARS`] or
/// when zero or several keys share the prefix.
#[must_use]
pub fn suggest<'a>(
    normalized_input: &str,
    remaining: &'a BTreeMap<EntryKey, Entry>,
) -> Option<&'a str> {
    if normalized_input.chars().count() < MIN_SUGGESTION_CHARS {
        return None;
    }

    // Keys sharing a prefix are contiguous in key order, starting at the prefix.
    let mut matches = remaining
        .range::<str, _>((Bound::Included(normalized_input), Bound::Unbounded))
        .take_while(|(key, _)| key.as_str().starts_with(normalized_input))
        .map(|(_, entry)| entry.display_name());

    let only = matches.next()?;
    if matches.next().is_some() {
        return None;
    }
    Some(only)
}
