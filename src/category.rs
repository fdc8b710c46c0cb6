//! Topical classification of feature identifiers.

/// A topic a feature identifier belongs to, such as "CSS property".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Category {
    /// Dotted prefix that selected this category; empty for the default.
    pub key: &'static str,
    pub title: &'static str,
    /// Issue-tracker label applied to PRs in this category.
    pub label: Option<&'static str>,
}

const fn cat(key: &'static str, title: &'static str, label: &'static str) -> Category {
    Category {
        key,
        title,
        label: Some(label),
    }
}

pub const DEFAULT: Category = Category {
    key: "",
    title: "feature",
    label: None,
};

/// Known prefixes, general before specific. Later entries override earlier
/// ones during [`classify`], so the order is load-bearing.
pub const CATEGORIES: &[Category] = &[
    cat("api", "API", "data:api"),
    cat("css.at-rules", "CSS at-rule", "data:css"),
    cat("css.selectors", "CSS selector", "data:css"),
    cat("css.types", "CSS value type", "data:css"),
    cat("css.properties", "CSS property", "data:css"),
    cat("html", "HTML feature", "data:html"),
    cat("html.elements", "HTML element", "data:html"),
    cat("html.manifest", "HTML manifest property", "data:html"),
    cat("http", "HTTP feature", "data:http"),
    cat("http.headers", "HTTP header", "data:http"),
    cat("javascript", "JavaScript feature", "data:js"),
    cat("javascript.builtins", "JavaScript builtin", "data:js"),
    cat("javascript.operators", "JavaScript operator", "data:js"),
    cat("mathml", "MathML feature", "data:mathml"),
    cat("mathml.elements", "MathML element", "data:mathml"),
    cat("svg", "SVG feature", "data:svg"),
    cat("svg.elements", "SVG element", "data:svg"),
    cat("webdriver.commands", "Web Driver command", "data:webdriver"),
    cat("webextensions", "Web Extensions feature", "data:webext"),
    cat("webextensions.api", "Web Extensions interface", "data:webext"),
    cat("webextensions.manifest", "Web Extensions manifest property", "data:webext"),
    cat("webassembly", "WebAssembly feature", "data:wasm"),
    cat("webassembly.api", "WebAssembly interface", "data:wasm"),
];

/// Resolve the category of `feature`.
///
/// Scans the whole table and keeps the last matching entry. A key matches
/// when it equals the identifier or is followed by a `.` in it.
pub fn classify(feature: &str) -> &'static Category {
    let mut found = &DEFAULT;
    for entry in CATEGORIES {
        if prefix_matches(feature, entry.key) {
            found = entry;
        }
    }
    found
}

fn prefix_matches(feature: &str, key: &str) -> bool {
    match feature.strip_prefix(key) {
        Some(rest) => rest.is_empty() || rest.starts_with('.'),
        None => false,
    }
}
