use regex::Regex;
use std::sync::OnceLock;

static NON_ALNUM: OnceLock<Regex> = OnceLock::new();

/// Collapse a workflow vocabulary string to its canonical comparable form:
/// lowercase, with every run of non-alphanumeric characters (whitespace,
/// slashes, punctuation) reduced to a single dash, and leading/trailing
/// dashes trimmed.
///
/// The stored status vocabulary is not canonically spelled, so both the
/// stored value and any comparison value must pass through here.
/// `"Review/Challenge"`, `"review-challenge"` and `"REVIEW CHALLENGE"` all
/// normalize to `"review-challenge"`.
pub fn normalize_status(raw: &str) -> String {
    let pattern = NON_ALNUM.get_or_init(|| Regex::new("[^a-z0-9]+").expect("static pattern"));
    pattern
        .replace_all(&raw.to_lowercase(), "-")
        .trim_matches('-')
        .to_string()
}
