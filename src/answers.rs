use std::path::PathBuf;

use crate::browser::Browser;
use crate::category::{self, Category};
use crate::pr_type::{FlagRemovalKind, PrType, Scope, ScopeChoice};
use crate::source::Source;

/// Everything the wizard collected for one PR.
///
/// Built by [`crate::wizard::gather`] and read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Answers {
    pub pr_type: PrType,
    /// Dotted feature identifier; empty for flag removal by flag.
    pub feature: String,
    pub category: &'static Category,
    /// Data file holding the feature, relative to the data root.
    pub file: Option<PathBuf>,
    pub browser: Option<Browser>,
    pub source: Option<Source>,
    /// Whether mdn/content needs a follow-up for a removal.
    pub content_update: bool,
    pub additional_notes: String,
    /// Stage `file` before committing.
    pub auto_stage: bool,
    pub flag_removal: Option<FlagRemovalKind>,
    pub flag: String,
    pub addition_scope: Option<Scope>,
    pub removal_scope: Option<Scope>,
    pub removal_reason: String,
}

impl Answers {
    /// An answer set with only the PR type chosen.
    pub fn new(pr_type: PrType) -> Self {
        Self {
            pr_type,
            feature: String::new(),
            category: &category::DEFAULT,
            file: None,
            browser: None,
            source: None,
            content_update: false,
            additional_notes: String::new(),
            auto_stage: false,
            flag_removal: None,
            flag: String::new(),
            addition_scope: None,
            removal_scope: None,
            removal_reason: String::new(),
        }
    }

    pub fn scope(&self) -> ScopeChoice {
        ScopeChoice {
            addition: self.addition_scope,
            removal: self.removal_scope,
            flag_removal: self.flag_removal,
        }
    }

    pub fn is_flag_removal_by_flag(&self) -> bool {
        self.pr_type == PrType::FlagRemoval && self.flag_removal == Some(FlagRemovalKind::ByFlag)
    }
}
