//! Named `{placeholder}` substitution for PR titles and descriptions.
//!
//! Templates are compiled-in strings; the field set is built from the
//! answer set. A placeholder with no matching field is a bug in the template
//! tables, so it is reported as [`PrError::UnknownPlaceholder`] rather than
//! rendered empty.

use std::collections::BTreeMap;
use std::sync::OnceLock;

use regex::Regex;

use crate::error::PrError;

/// Compiled once; the pattern is a valid literal so init cannot fail at runtime.
static PLACEHOLDER_RE: OnceLock<Regex> = OnceLock::new();

fn placeholder_re() -> &'static Regex {
    PLACEHOLDER_RE.get_or_init(|| {
        Regex::new(r"\{([A-Za-z_][A-Za-z0-9_]*)\}").expect("valid literal regex")
    })
}

/// Field values available to a template, keyed by placeholder name.
pub type Fields = BTreeMap<&'static str, String>;

/// Replace every `{name}` in `template` with `fields[name]`.
///
/// Only the template is scanned; substituted values are copied verbatim, so
/// braces inside user text never become placeholders.
pub fn render(template: &str, fields: &Fields) -> Result<String, PrError> {
    let re = placeholder_re();
    let mut out = String::with_capacity(template.len());
    let mut last = 0;

    for caps in re.captures_iter(template) {
        let whole = caps.get(0).expect("capture 0 is the whole match");
        let name = &caps[1];
        let value = fields
            .get(name)
            .ok_or_else(|| PrError::UnknownPlaceholder {
                placeholder: name.to_owned(),
                template: template.to_owned(),
            })?;
        out.push_str(&template[last..whole.start()]);
        out.push_str(value);
        last = whole.end();
    }

    out.push_str(&template[last..]);
    Ok(out)
}
