//! Best-effort email extraction from listing text.
//!
//! Places listings rarely carry an email address, so a miss is the normal
//! outcome. Matches are not validated for deliverability.

use std::sync::LazyLock;

use regex::Regex;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b").expect("valid email regex")
});

/// Returns the first email-shaped token in `text`.
#[must_use]
pub fn find_email(text: &str) -> Option<&str> {
    EMAIL_RE.find(text).map(|m| m.as_str())
}

/// Looks for an email in the business name first, then in the address.
#[must_use]
pub fn extract_email(name: Option<&str>, address: Option<&str>) -> Option<String> {
    [name, address]
        .into_iter()
        .flatten()
        .find_map(find_email)
        .map(str::to_owned)
}
