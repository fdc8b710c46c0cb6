//! Build the PR title, description, branch name and labels from an answer set.
//!
//! Templates may reference these fields:
//!
//! | placeholder           | value                                         |
//! |-----------------------|-----------------------------------------------|
//! | `feature`             | dotted identifier (when a feature is set)     |
//! | `title`               | short feature title (when a feature is set)   |
//! | `feature_description` | feature phrase (when a feature is set)        |
//! | `flag`                | flag name                                     |
//! | `pr_type`             | PR type label                                 |
//! | `browser`             | short browser name (when a browser is set)    |
//! | `browser_full`        | long browser name (when a browser is set)     |
//! | `browser_id`          | browser key (when a browser is set)           |
//! | `collector`           | collector project phrase                      |
//!
//! Anything else fails with [`PrError::UnknownPlaceholder`].

use tracing::debug;

use crate::answers::Answers;
use crate::collector::CollectorInfo;
use crate::error::PrError;
use crate::feature;
use crate::pr_type::{self, PrType};
use crate::template::{self, Fields};

pub const CONTENT_UPDATE_LABEL: &str = "needs content update";

/// Finished PR text and metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrContent {
    pub title: String,
    pub description: String,
    pub branch: String,
    pub labels: Vec<String>,
}

impl PrContent {
    /// Commit message / PR body: the title, a blank line, then the description.
    pub fn message(&self) -> String {
        format!("{}\n\n{}", self.title, self.description)
    }
}

pub fn assemble(answers: &Answers, collector: &CollectorInfo) -> Result<PrContent, PrError> {
    let (title, description) = title_and_description(answers, collector)?;
    let content = PrContent {
        title,
        description,
        branch: branch_name(answers),
        labels: labels(answers),
    };
    debug!(
        branch = %content.branch,
        labels = ?content.labels,
        description_len = content.description.len(),
        "assembled PR content"
    );
    Ok(content)
}

fn fields(answers: &Answers, collector: &CollectorInfo) -> Fields {
    let mut f = Fields::new();
    f.insert("pr_type", answers.pr_type.label().to_owned());
    f.insert("flag", answers.flag.clone());
    f.insert("collector", collector.phrase());

    if !answers.feature.is_empty() {
        f.insert("feature", answers.feature.clone());
        f.insert("title", feature::title(&answers.feature, answers.category));
        f.insert(
            "feature_description",
            feature::description(&answers.feature, answers.category),
        );
    }

    if let Some(b) = &answers.browser {
        f.insert("browser", b.name.to_owned());
        f.insert("browser_full", b.long_name.to_owned());
        f.insert("browser_id", b.id.to_owned());
    }

    f
}

fn title_and_description(
    answers: &Answers,
    collector: &CollectorInfo,
) -> Result<(String, String), PrError> {
    let pair = answers.pr_type.templates(answers.scope())?;
    let fields = fields(answers, collector);

    let title = template::render(pair.title, &fields)?;
    let mut description = template::render(pair.description, &fields)?;

    let is_removal = answers.pr_type == PrType::FeatureRemoval;
    if is_removal && !answers.removal_reason.is_empty() {
        description.push(' ');
        match pr_type::removal_reason_text(&answers.removal_reason) {
            Some(text) => description.push_str(&template::render(text, &fields)?),
            None => description.push_str(&answers.removal_reason),
        }
    }

    // A non-interface removal is its own justification.
    let carries_source =
        !(is_removal && answers.removal_reason == pr_type::NON_INTERFACE_REASON);

    if let Some(source) = answers.source.as_ref().filter(|_| carries_source) {
        match source.kind.template() {
            Some(t) => {
                let rendered = t.render(&source.data, &collector.phrase())?;
                // Removal text already names its evidence.
                if !is_removal {
                    description.push(' ');
                    description.push_str(&rendered.description);
                }
                if let Some(data) = rendered.data {
                    description.push_str("\n\n");
                    description.push_str(&data);
                }
            }
            None => {
                description.push(' ');
                description.push_str(&source.data);
            }
        }
    }

    let notes = answers.additional_notes.trim();
    if !notes.is_empty() {
        description.push_str("\n\nAdditional Notes: ");
        description.push_str(notes);
    }

    Ok((title, description))
}

/// Branch name for the PR; a pure function of the answers.
pub fn branch_name(answers: &Answers) -> String {
    let browser_id = answers.browser.as_ref().map(|b| b.id).unwrap_or_default();

    if answers.is_flag_removal_by_flag() {
        return format!(
            "flagremoval/{}/{browser_id}",
            answers.flag.replace('.', "-")
        );
    }

    let base = answers.feature.replace('.', "/").replace('*', "");
    match (browser_id.is_empty(), answers.pr_type.branch_suffix()) {
        (false, Some(suffix)) => format!("{base}/{browser_id}-{suffix}"),
        (false, None) => format!("{base}/{browser_id}"),
        (true, Some(suffix)) => format!("{base}/{suffix}"),
        (true, None) => base,
    }
}

/// Labels to apply to the PR, in order and without duplicates.
pub fn labels(answers: &Answers) -> Vec<String> {
    let mut labels: Vec<String> = Vec::new();
    if answers.pr_type == PrType::FeatureRemoval && answers.content_update {
        labels.push(CONTENT_UPDATE_LABEL.to_owned());
    }
    if let Some(label) = answers.category.label {
        labels.push(label.to_owned());
    }
    labels.dedup();
    labels
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::browser;
    use crate::category::classify;
    use crate::pr_type::{FlagRemovalKind, Scope};
    use crate::source::{Source, SourceKind};

    fn collector() -> CollectorInfo {
        CollectorInfo {
            version: Some("10.0.0".to_owned()),
        }
    }

    fn for_feature(pr_type: PrType, feature: &str) -> Answers {
        let mut a = Answers::new(pr_type);
        a.feature = feature.to_owned();
        a.category = classify(feature);
        a
    }

    fn real_values_firefox_bug() -> Answers {
        let mut a = for_feature(PrType::RealValuesAdditions, "api.AbortController.abort");
        a.browser = browser::by_id("firefox");
        a.source = Some(Source {
            kind: SourceKind::Bug,
            data: "1234567".to_owned(),
        });
        a
    }

    #[test]
    fn real_values_with_bug_source() {
        let content = assemble(&real_values_firefox_bug(), &collector()).unwrap();

        assert_eq!(content.title, "Add Firefox versions for AbortController abort");
        assert_eq!(
            content.description,
            "This PR replaces `true`/`null` values with exact version numbers (or `false`) for \
             Firefox and Firefox Android for the `abort` member of the `AbortController` API. \
             The data comes from a bug in the web browser's bug tracker.\n\nBug: 1234567"
        );
        assert!(!content.description.contains("Additional Notes"));
        assert_eq!(content.branch, "api/AbortController/abort/firefox-real-values");
        assert_eq!(content.labels, vec!["data:api"]);
    }

    #[test]
    fn message_joins_title_and_description() {
        let content = assemble(&real_values_firefox_bug(), &collector()).unwrap();
        let msg = content.message();
        assert!(msg.starts_with("Add Firefox versions for AbortController abort\n\nThis PR"));
        assert_eq!(msg.lines().next(), Some(content.title.as_str()));
    }

    #[test]
    fn additional_notes_are_the_final_paragraph() {
        let mut a = real_values_firefox_bug();
        a.additional_notes = "Checked on Nightly too.".to_owned();
        let content = assemble(&a, &collector()).unwrap();
        assert!(
            content
                .description
                .ends_with("\n\nAdditional Notes: Checked on Nightly too."),
            "got: {}",
            content.description
        );
    }

    #[test]
    fn whitespace_only_notes_are_omitted() {
        let mut a = real_values_firefox_bug();
        a.additional_notes = "  \n".to_owned();
        let content = assemble(&a, &collector()).unwrap();
        assert!(!content.description.contains("Additional Notes"));
    }

    #[test]
    fn flag_removal_by_flag_branch_and_title() {
        let mut a = Answers::new(PrType::FlagRemoval);
        a.flag_removal = Some(FlagRemovalKind::ByFlag);
        a.flag = "MediaRecorder".to_owned();
        a.browser = browser::by_id("chrome");

        let content = assemble(&a, &collector()).unwrap();
        assert_eq!(content.branch, "flagremoval/MediaRecorder/chrome");
        assert_eq!(content.title, "Remove irrelevant `MediaRecorder` flag in Chromium");
        assert!(content.labels.is_empty());
    }

    #[test]
    fn flag_names_have_dots_turned_to_dashes() {
        let mut a = Answers::new(PrType::FlagRemoval);
        a.flag_removal = Some(FlagRemovalKind::ByFlag);
        a.flag = "dom.webgpu.enabled".to_owned();
        a.browser = browser::by_id("firefox");
        assert_eq!(branch_name(&a), "flagremoval/dom-webgpu-enabled/firefox");
    }

    #[test]
    fn branch_without_browser_uses_suffix_only() {
        let mut a = for_feature(PrType::NewEntry, "css.properties.*.anchor");
        a.addition_scope = Some(Scope::Entire);
        assert_eq!(branch_name(&a), "css/properties//anchor/additions");

        let a = for_feature(PrType::MetadataCorrections, "http.headers.Accept");
        assert_eq!(branch_name(&a), "http/headers/Accept/metadata-corrections");
    }

    #[test]
    fn branch_name_is_deterministic() {
        let a = real_values_firefox_bug();
        assert_eq!(branch_name(&a), branch_name(&a.clone()));
    }

    #[test]
    fn non_interface_removal_carries_no_source() {
        let mut a = for_feature(PrType::FeatureRemoval, "api.GPUExtent3DDict");
        a.removal_scope = Some(Scope::Entire);
        a.removal_reason = pr_type::NON_INTERFACE_REASON.to_owned();
        // Even if a source slipped through it must not be rendered.
        a.source = Some(Source {
            kind: SourceKind::Collector,
            data: "https://example.test".to_owned(),
        });

        let content = assemble(&a, &collector()).unwrap();
        assert_eq!(content.title, "Remove GPUExtent3DDict API from BCD");
        assert!(content.description.contains("virtually invisible"));
        assert!(!content.description.contains("Tests Used"));
        assert!(!content.description.contains("The data comes from"));
    }

    #[test]
    fn irrelevant_removal_embeds_collector_and_tests_used() {
        let mut a = for_feature(PrType::FeatureRemoval, "api.Foo.bar");
        a.removal_scope = Some(Scope::Subfeatures);
        a.removal_reason = "Irrelevant".to_owned();
        a.content_update = true;
        a.source = Some(Source {
            kind: SourceKind::Collector,
            data: "https://mdn-bcd-collector.gooborg.com/tests/api/Foo/bar".to_owned(),
        });

        let content = assemble(&a, &collector()).unwrap();
        assert!(content.description.starts_with(
            "This PR removes the unsupported subfeatures of the `bar` member of the `Foo` API from BCD. Per the"
        ));
        assert!(content.description.contains("confirmed by the [mdn-bcd-collector]"));
        assert!(content.description.contains("(v10.0.0)"));
        assert!(!content.description.contains("The data comes from"));
        assert!(content.description.ends_with(
            "\n\nTests Used: https://mdn-bcd-collector.gooborg.com/tests/api/Foo/bar"
        ));
        assert_eq!(content.labels, vec![CONTENT_UPDATE_LABEL, "data:api"]);
        assert_eq!(content.branch, "api/Foo/bar/removal");
    }

    #[test]
    fn free_text_removal_reason_is_verbatim() {
        let mut a = for_feature(PrType::FeatureRemoval, "api.Foo");
        a.removal_scope = Some(Scope::Entire);
        a.removal_reason = "Never shipped {anywhere}.".to_owned();
        let content = assemble(&a, &collector()).unwrap();
        assert!(content.description.ends_with("from BCD. Never shipped {anywhere}."));
    }

    #[test]
    fn other_source_is_appended_raw() {
        let mut a = for_feature(PrType::CompatDataCorrections, "css.properties.color");
        a.browser = browser::by_id("safari");
        a.source = Some(Source {
            kind: SourceKind::Other,
            data: "See the WebKit blog.".to_owned(),
        });
        let content = assemble(&a, &collector()).unwrap();
        assert_eq!(content.title, "Update Safari data for color CSS property");
        assert!(content.description.ends_with("CSS property. See the WebKit blog."));
        assert_eq!(content.labels, vec!["data:css"]);
    }

    #[test]
    fn manual_code_with_braces_is_not_a_template() {
        let mut a = for_feature(PrType::CompatDataCorrections, "api.Foo");
        a.browser = browser::by_id("edge");
        a.source = Some(Source {
            kind: SourceKind::Manual,
            data: "\n```\nif (window.Foo) { log({ ok: true }); }\n```".to_owned(),
        });
        let content = assemble(&a, &collector()).unwrap();
        assert!(content.description.contains("Test Code: \n```\nif (window.Foo) { log({ ok: true }); }\n```"));
    }

    #[test]
    fn missing_browser_for_browser_template_is_fatal() {
        let a = for_feature(PrType::CompatDataCorrections, "api.Foo");
        let err = assemble(&a, &collector()).unwrap_err();
        assert!(
            matches!(err, PrError::UnknownPlaceholder { ref placeholder, .. } if placeholder == "browser"),
            "unexpected: {err:?}"
        );
    }

    #[test]
    fn new_entry_without_scope_is_fatal() {
        let a = for_feature(PrType::NewEntry, "api.Foo");
        assert!(matches!(
            assemble(&a, &collector()),
            Err(PrError::MissingScope { .. })
        ));
    }
}
