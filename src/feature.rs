//! Feature identifiers and how they are worded in PR text.

use crate::category::Category;
use crate::error::PrError;

/// Check that `feature` is a usable dotted identifier.
pub fn validate(feature: &str) -> Result<(), PrError> {
    let invalid = |reason: &str| PrError::InvalidFeature {
        feature: feature.to_owned(),
        reason: reason.to_owned(),
    };
    if feature.trim().is_empty() {
        return Err(invalid("identifier is empty"));
    }
    if feature.split('.').any(|s| s.is_empty()) {
        return Err(invalid("identifier has an empty segment"));
    }
    if feature.chars().any(char::is_whitespace) {
        return Err(invalid("identifier contains whitespace"));
    }
    Ok(())
}

/// Split `feature` into its first segment below the category and the rest.
fn split_below_category<'a>(feature: &'a str, category: &Category) -> (&'a str, &'a str) {
    let below = if category.key.is_empty() {
        feature
    } else {
        feature
            .strip_prefix(category.key)
            .and_then(|rest| rest.strip_prefix('.'))
            .unwrap_or(feature)
    };
    below.split_once('.').unwrap_or((below, ""))
}

/// Short title, e.g. `AbortController API` or `AbortController abort`.
pub fn title(feature: &str, category: &Category) -> String {
    let (head, rest) = split_below_category(feature, category);
    if rest.is_empty() {
        format!("{head} {}", category.title)
    } else {
        format!("{head} {rest}")
    }
}

/// Description phrase used inside PR bodies, with identifiers in backticks.
pub fn description(feature: &str, category: &Category) -> String {
    let (head, rest) = split_below_category(feature, category);
    if rest.is_empty() {
        return format!("`{head}` {}", category.title);
    }
    match rest.strip_suffix("_static") {
        Some(method) => format!(
            "`{method}` static method of the `{head}` {}",
            category.title
        ),
        None => format!("`{rest}` member of the `{head}` {}", category.title),
    }
}
