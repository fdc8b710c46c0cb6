//! Where the data in a PR comes from.

use crate::error::PrError;
use crate::template::{self, Fields};

const REVIEW_GUIDE: &str = "_Check out the [collector's guide on how to review this PR](https://github.com/openwebdocs/mdn-bcd-collector#reviewing-bcd-changes)._";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Collector,
    RuntimeCompat,
    Manual,
    Commit,
    Bug,
    IssueFix,
    Mirror,
    EarliestRange,
    /// Free text entered by the user instead of a known source.
    Other,
}

/// Description and optional source-data line for a known source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceTemplate {
    pub description: &'static str,
    pub data: Option<&'static str>,
}

/// The evidence attached to a PR.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Source {
    pub kind: SourceKind,
    pub data: String,
}

impl SourceKind {
    /// Known sources, in the order they are offered.
    pub const KNOWN: [SourceKind; 8] = [
        SourceKind::Collector,
        SourceKind::RuntimeCompat,
        SourceKind::Manual,
        SourceKind::Commit,
        SourceKind::Bug,
        SourceKind::IssueFix,
        SourceKind::Mirror,
        SourceKind::EarliestRange,
    ];

    pub fn label(self) -> &'static str {
        match self {
            SourceKind::Collector => "mdn-bcd-collector",
            SourceKind::RuntimeCompat => "runtime-compat",
            SourceKind::Manual => "Manual",
            SourceKind::Commit => "Commit",
            SourceKind::Bug => "Bug",
            SourceKind::IssueFix => "Issue Fix",
            SourceKind::Mirror => "Mirror",
            SourceKind::EarliestRange => "Earliest Range from Commit",
            SourceKind::Other => "Other",
        }
    }

    /// Templates for this source; `None` for free-text sources.
    pub fn template(self) -> Option<SourceTemplate> {
        let t = |description, data| Some(SourceTemplate { description, data });
        match self {
            SourceKind::Collector => t(
                "The data comes from the {collector}.\n\n{review_guide}",
                Some("Tests Used: {source}"),
            ),
            SourceKind::RuntimeCompat => t(
                "The data comes from the {collector}, using results collected via [UnJS' runtime-compat project](https://github.com/unjs/runtime-compat).\n\n{review_guide}",
                Some("Tests Used: {source}"),
            ),
            SourceKind::Manual => t(
                "The data comes from manual testing, running test code through BrowserStack, SauceLabs, custom VMs and/or locally.",
                Some("Test Code: {source}"),
            ),
            SourceKind::Commit => t(
                "The data comes from a commit in the browser's source code, mapped to a version number using available tooling or via the commit timestamp.",
                Some("Commit: {source}"),
            ),
            SourceKind::Bug => t(
                "The data comes from a bug in the web browser's bug tracker.",
                Some("Bug: {source}"),
            ),
            SourceKind::IssueFix => t(
                "This fixes #{source}, which contains the supporting evidence for this change.",
                None,
            ),
            SourceKind::Mirror => t(
                "This sets the downstream browser(s) to mirror from their upstream counterpart.",
                None,
            ),
            SourceKind::EarliestRange => t(
                "This sets the feature(s) to a version range based upon the date that the feature was added to BCD with the intent of replacing `true` values with ranged values to eliminate `true` values from BCD.",
                Some("Commit/PR Adding the Feature: {source}"),
            ),
            SourceKind::Other => None,
        }
    }

    pub fn from_label(label: &str) -> Option<SourceKind> {
        SourceKind::KNOWN.into_iter().find(|k| k.label() == label)
    }
}

/// A source template rendered with its data and the collector phrase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedSource {
    pub description: String,
    pub data: Option<String>,
}

impl SourceTemplate {
    pub fn render(&self, source_data: &str, collector: &str) -> Result<RenderedSource, PrError> {
        let mut fields = Fields::new();
        fields.insert("source", source_data.to_owned());
        fields.insert("collector", collector.to_owned());
        fields.insert("review_guide", REVIEW_GUIDE.to_owned());

        Ok(RenderedSource {
            description: template::render(self.description, &fields)?,
            data: self
                .data
                .map(|d| template::render(d, &fields))
                .transpose()?,
        })
    }
}
