//! PR types and their title/description templates.
//!
//! Templates use the placeholders listed in [`crate::assemble`]: `title`,
//! `feature_description`, `browser`, `browser_full`, `flag` and `collector`.

use crate::error::PrError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrType {
    CompatDataCorrections,
    MetadataCorrections,
    NewEntry,
    RealValuesAdditions,
    FeatureRemoval,
    FlagRemoval,
}

/// Whether a change covers a whole feature node or only its subfeatures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    Entire,
    Subfeatures,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlagRemovalKind {
    ByFlag,
    ByFeature,
}

/// Selector for the template pair of a PR type.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScopeChoice {
    pub addition: Option<Scope>,
    pub removal: Option<Scope>,
    pub flag_removal: Option<FlagRemovalKind>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TemplatePair {
    pub title: &'static str,
    pub description: &'static str,
}

/// Canned justification texts for feature removal, keyed by reason name.
pub const REMOVAL_REASONS: &[(&str, &str)] = &[
    (
        "Irrelevant",
        "Per the [data guidelines](https://github.com/mdn/browser-compat-data/blob/main/docs/data-guidelines/index.md#removal-of-irrelevant-features), this feature can be considered irrelevant and may be removed from BCD accordingly. Even if the current data suggests that the feature is supported, lack of support has been confirmed by the {collector}.",
    ),
    (
        "Non-Interface",
        "This feature is a type (ex. a dictionary, enum, mixin, constant or WebIDL typedef) that we have explicitly stated not to document separately from the feature(s) that depend on it, as they are virtually invisible to the end developer.",
    ),
];

pub const NON_INTERFACE_REASON: &str = "Non-Interface";

/// Canned text for a named reason; `None` for free-text reasons.
pub fn removal_reason_text(reason: &str) -> Option<&'static str> {
    REMOVAL_REASONS
        .iter()
        .find(|(name, _)| *name == reason)
        .map(|&(_, text)| text)
}

impl PrType {
    pub const ALL: [PrType; 6] = [
        PrType::CompatDataCorrections,
        PrType::MetadataCorrections,
        PrType::NewEntry,
        PrType::RealValuesAdditions,
        PrType::FeatureRemoval,
        PrType::FlagRemoval,
    ];

    pub fn label(self) -> &'static str {
        match self {
            PrType::CompatDataCorrections => "Compat Data Corrections",
            PrType::MetadataCorrections => "Metadata Corrections",
            PrType::NewEntry => "New Entry",
            PrType::RealValuesAdditions => "Real Values Additions",
            PrType::FeatureRemoval => "Feature Removal",
            PrType::FlagRemoval => "Flag Removal",
        }
    }

    pub fn branch_suffix(self) -> Option<&'static str> {
        Some(match self {
            PrType::CompatDataCorrections => "corrections",
            PrType::MetadataCorrections => "metadata-corrections",
            PrType::NewEntry => "additions",
            PrType::RealValuesAdditions => "real-values",
            PrType::FeatureRemoval => "removal",
            PrType::FlagRemoval => "flag-removal",
        })
    }

    /// PR types that name a single browser in their templates.
    pub fn asks_browser(self) -> bool {
        !matches!(
            self,
            PrType::NewEntry | PrType::MetadataCorrections | PrType::FeatureRemoval
        )
    }

    /// PR types whose evidence is chosen from the data-source table.
    pub fn asks_source(self) -> bool {
        !matches!(
            self,
            PrType::MetadataCorrections | PrType::FlagRemoval | PrType::FeatureRemoval
        )
    }

    /// Pick the template pair for this type, using the matching scope for
    /// scoped types.
    pub fn templates(self, scope: ScopeChoice) -> Result<TemplatePair, PrError> {
        let pair = |title, description| TemplatePair { title, description };
        let missing = |what| PrError::MissingScope {
            pr_type: self.label(),
            scope: what,
        };

        Ok(match self {
            PrType::CompatDataCorrections => pair(
                "Update {browser} data for {title}",
                "This PR updates and corrects version values for {browser_full} for the {feature_description}.",
            ),
            PrType::MetadataCorrections => pair(
                "Update metadata for {title}",
                "This PR updates and corrects the metadata (spec URLs, descriptions, statuses, etc.) for the {feature_description}.",
            ),
            PrType::NewEntry => match scope.addition.ok_or_else(|| missing("addition scope"))? {
                Scope::Entire => pair(
                    "Add missing {title} feature",
                    "This PR adds the missing {feature_description}.",
                ),
                Scope::Subfeatures => pair(
                    "Add missing features for {title}",
                    "This PR adds the missing features of the {feature_description}.",
                ),
            },
            PrType::RealValuesAdditions => pair(
                "Add {browser} versions for {title}",
                "This PR replaces `true`/`null` values with exact version numbers (or `false`) for {browser_full} for the {feature_description}.",
            ),
            PrType::FeatureRemoval => match scope.removal.ok_or_else(|| missing("removal scope"))? {
                Scope::Entire => pair(
                    "Remove {title} from BCD",
                    "This PR removes the {feature_description} from BCD.",
                ),
                Scope::Subfeatures => pair(
                    "Remove subfeatures of {title} from BCD",
                    "This PR removes the unsupported subfeatures of the {feature_description} from BCD.",
                ),
            },
            PrType::FlagRemoval => match scope
                .flag_removal
                .ok_or_else(|| missing("flag removal kind"))?
            {
                FlagRemovalKind::ByFlag => pair(
                    "Remove irrelevant `{flag}` flag in {browser}",
                    "This PR removes irrelevant flag data for the `{flag}` flag of {browser_full} as per the corresponding [data guidelines](https://github.com/mdn/browser-compat-data/blob/main/docs/data-guidelines/index.md#removal-of-irrelevant-flag-data). This PR was created from results of the `remove-redundant-flags` script.",
                ),
                FlagRemovalKind::ByFeature => pair(
                    "Remove irrelevant {browser} flag data for {title}",
                    "This PR removes irrelevant flag data for {browser_full} for the {feature_description} as per the corresponding [data guidelines](https://github.com/mdn/browser-compat-data/blob/main/docs/data-guidelines/index.md#removal-of-irrelevant-flag-data). This PR was created from results of the `remove-redundant-flags` script.",
                ),
            },
        })
    }
}

impl std::fmt::Display for PrType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FLAG_GUIDELINES: &str = "[data guidelines](https://github.com/mdn/browser-compat-data/blob/main/docs/data-guidelines/index.md#removal-of-irrelevant-flag-data)";

    #[test]
    fn every_type_has_a_distinct_suffix() {
        let mut suffixes: Vec<_> = PrType::ALL.iter().filter_map(|t| t.branch_suffix()).collect();
        assert_eq!(suffixes.len(), PrType::ALL.len());
        suffixes.sort_unstable();
        suffixes.dedup();
        assert_eq!(suffixes.len(), PrType::ALL.len());
    }

    #[test]
    fn unscoped_types_ignore_scope() {
        let pair = PrType::RealValuesAdditions
            .templates(ScopeChoice::default())
            .unwrap();
        assert_eq!(pair.title, "Add {browser} versions for {title}");
    }

    #[test]
    fn new_entry_selects_by_addition_scope() {
        let scope = ScopeChoice {
            addition: Some(Scope::Subfeatures),
            ..ScopeChoice::default()
        };
        let pair = PrType::NewEntry.templates(scope).unwrap();
        assert_eq!(pair.title, "Add missing features for {title}");
    }

    #[test]
    fn scoped_type_without_scope_is_an_error() {
        let err = PrType::FeatureRemoval
            .templates(ScopeChoice::default())
            .unwrap_err();
        assert!(
            format!("{err}").contains("removal scope"),
            "unexpected: {err}"
        );
    }

    #[test]
    fn flag_removal_descriptions_link_the_guidelines() {
        for kind in [FlagRemovalKind::ByFlag, FlagRemovalKind::ByFeature] {
            let scope = ScopeChoice {
                flag_removal: Some(kind),
                ..ScopeChoice::default()
            };
            let pair = PrType::FlagRemoval.templates(scope).unwrap();
            assert!(pair.description.contains(FLAG_GUIDELINES));
        }
    }

    #[test]
    fn browser_and_source_questions_per_type() {
        assert!(PrType::CompatDataCorrections.asks_browser());
        assert!(PrType::FlagRemoval.asks_browser());
        assert!(!PrType::NewEntry.asks_browser());
        assert!(PrType::NewEntry.asks_source());
        assert!(!PrType::FeatureRemoval.asks_source());
        assert!(!PrType::MetadataCorrections.asks_source());
    }

    #[test]
    fn named_reasons_resolve_and_free_text_does_not() {
        assert!(removal_reason_text("Irrelevant").unwrap().contains("{collector}"));
        assert!(removal_reason_text(NON_INTERFACE_REASON).is_some());
        assert!(removal_reason_text("Never shipped").is_none());
    }
}
