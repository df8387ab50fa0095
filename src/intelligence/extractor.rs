use std::collections::BTreeSet;
use std::sync::OnceLock;

use regex::Regex;

use crate::models::{CandidateBin, BIN_LENGTH};

/// Extract every standalone 6-digit token from `text`.
///
/// A token counts only when it is a maximal run of decimal digits of exactly
/// six characters, i.e. bounded by a non-digit or the string edge on both
/// sides. Any Unicode decimal digit extends a run, but only all-ASCII runs
/// become candidates. Longer runs (card numbers, phone numbers, timestamps)
/// are skipped whole and never split into 6-digit pieces.
///
/// The result is a set ordered by digit value.
pub fn extract(text: &str) -> BTreeSet<CandidateBin> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| Regex::new(r"\d+").expect("digit-run regex is valid"));

    re.find_iter(text)
        .filter(|m| m.as_str().chars().count() == BIN_LENGTH)
        .filter_map(|m| CandidateBin::parse(m.as_str()))
        .collect()
}
