//! Maps free-text input onto the canonical key space.

/// Fixed exception table applied after the general transform, in order.
///
/// Every replacement is shorter in bytes than its source.
const SUBSTITUTIONS: &[(&str, &str)] = &[
    ("mr.-", "mr-"),
    ("jr.", "jr"),
    ("-♀", "-f"),
    ("♀", "-f"),
    ("-♂", "-m"),
    ("♂", "-m"),
    ("é", "e"),
    ("'", ""),
    ("’", ""),
    (":", ""),
];

/// Normalizes raw user text into a candidate entry key.
///
/// Trims, lower-cases and replaces the first space with a hyphen; later
/// spaces are left alone. The substitution table then folds the known
/// special-case spellings (`Mr. Mime`, `Nidoran♀`, `Farfetch'd`, `Flabébé`,
/// `Type: Null`) onto their keys. Never fails; unknown text simply matches
/// no key.
#[must_use]
pub fn normalize_name(raw: &str) -> String {
    let mut name = raw.trim().to_lowercase().replacen(' ', "-", 1);
    // Later rules can expose an earlier fragment (`mr.'-` becomes `mr.-`),
    // so repeat until the table no longer applies.
    let mut changed = true;
    while changed {
        changed = false;
        for (from, to) in SUBSTITUTIONS {
            if name.contains(from) {
                name = name.replace(from, to);
                changed = true;
            }
        }
    }
    // Removing punctuation can expose whitespace at either end.
    let trimmed = name.trim();
    if trimmed.len() == name.len() {
        name
    } else {
        trimmed.to_owned()
    }
}
