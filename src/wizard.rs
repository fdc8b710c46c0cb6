//! The interactive question flow that produces an [`Answers`] set.

use std::path::Path;

use tracing::{debug, info};

use crate::answers::Answers;
use crate::browser;
use crate::category;
use crate::collector;
use crate::error::PrError;
use crate::feature;
use crate::locate;
use crate::pr_type::{self, FlagRemovalKind, PrType, Scope};
use crate::prompt::{Choice, Prompter};
use crate::source::{Source, SourceKind};

const SCOPE_OPTIONS: [&str; 2] = ["Entire Feature", "Only Subfeatures"];

/// Ask every question needed for one PR.
///
/// `data_root` is where features are located. `is_untracked` reports whether
/// a located file (relative to `data_root`) is new to git, which decides the
/// addition scope of a new entry without asking.
pub fn gather<F>(
    prompter: &mut dyn Prompter,
    data_root: &Path,
    is_untracked: F,
) -> Result<Answers, PrError>
where
    F: Fn(&Path) -> Result<bool, PrError>,
{
    let pr_type = ask_pr_type(prompter)?;
    let mut answers = Answers::new(pr_type);

    if pr_type == PrType::FlagRemoval {
        let question = "Is removal by the flag, or by the feature?";
        let choice = prompter.select(question, &["By Flag", "By Feature"], false)?;
        answers.flag_removal = Some(pick(
            question,
            choice,
            &[FlagRemovalKind::ByFlag, FlagRemovalKind::ByFeature],
        )?);
    }

    if answers.is_flag_removal_by_flag() {
        answers.flag = prompter.text("Flag Name", true)?.trim().to_owned();
    } else {
        ask_feature(prompter, data_root, &mut answers)?;
    }

    if pr_type == PrType::NewEntry {
        let untracked = match &answers.file {
            Some(file) => is_untracked(file)?,
            None => false,
        };
        answers.addition_scope = Some(if untracked {
            debug!("located file is untracked; adding the entire feature");
            Scope::Entire
        } else {
            ask_scope(prompter, "What is the addition scope?")?
        });
    }

    if pr_type.asks_browser() {
        let browsers = browser::all();
        let names: Vec<&str> = browsers.iter().map(|b| b.name).collect();
        let question = "What browser is updated in this PR?";
        let choice = prompter.select(question, &names, false)?;
        answers.browser = Some(pick(question, choice, &browsers)?);
    }

    if pr_type == PrType::FeatureRemoval {
        ask_removal(prompter, &mut answers)?;
    } else if pr_type.asks_source() {
        answers.source = Some(ask_source(prompter, &answers.feature)?);
    }

    answers.additional_notes = prompter.text("Is there anything else you want to add?", false)?;

    if let Some(file) = &answers.file {
        let question = format!("Should {} be staged?", file.display());
        answers.auto_stage = prompter.confirm(&question, true)?;
    }

    info!(
        pr_type = %answers.pr_type,
        feature = %answers.feature,
        file = ?answers.file,
        "answers collected"
    );
    Ok(answers)
}

fn ask_pr_type(prompter: &mut dyn Prompter) -> Result<PrType, PrError> {
    let labels: Vec<&str> = PrType::ALL.iter().map(|t| t.label()).collect();
    let question = "What type of pull request should this be?";
    let choice = prompter.select(question, &labels, false)?;
    pick(question, choice, &PrType::ALL)
}

/// Map a choice onto `items`. Free text and out-of-range indices are errors,
/// since only questions offering "Other" accept free text.
fn pick<T: Clone>(question: &str, choice: Choice, items: &[T]) -> Result<T, PrError> {
    let answer = match choice {
        Choice::Index(i) => match items.get(i) {
            Some(item) => return Ok(item.clone()),
            None => (i + 1).to_string(),
        },
        Choice::Other(text) => text,
    };
    Err(PrError::InvalidChoice {
        question: question.to_owned(),
        answer,
    })
}

/// Ask for a feature until its file is found or the user proceeds without one.
fn ask_feature(
    prompter: &mut dyn Prompter,
    data_root: &Path,
    answers: &mut Answers,
) -> Result<(), PrError> {
    let removal = answers.pr_type == PrType::FeatureRemoval;
    loop {
        let feature = prompter.text("Feature Identifier", true)?.trim().to_owned();
        if let Err(e) = feature::validate(&feature) {
            prompter.say(&e.to_string())?;
            continue;
        }

        answers.category = category::classify(&feature);
        answers.file = locate::locate(data_root, &feature, removal)?;
        answers.feature = feature;

        if answers.file.is_some() {
            return Ok(());
        }

        let proceed = if removal {
            prompter.confirm(
                "It looks like the entire file was removed, remember to stage the changes first! Proceed?",
                true,
            )?
        } else {
            prompter.confirm("No matching file found! Proceed anyways?", false)?
        };
        if proceed {
            return Ok(());
        }
    }
}

fn ask_scope(prompter: &mut dyn Prompter, question: &str) -> Result<Scope, PrError> {
    let choice = prompter.select(question, &SCOPE_OPTIONS, false)?;
    pick(question, choice, &[Scope::Entire, Scope::Subfeatures])
}

fn ask_removal(prompter: &mut dyn Prompter, answers: &mut Answers) -> Result<(), PrError> {
    answers.removal_scope = Some(ask_scope(prompter, "What is the removal scope?")?);

    let reasons: Vec<&str> = pr_type::REMOVAL_REASONS.iter().map(|&(name, _)| name).collect();
    let question = "Why is this feature being removed?";
    answers.removal_reason = match prompter.select(question, &reasons, true)? {
        Choice::Other(text) => text,
        index => pick(question, index, &reasons)?.to_owned(),
    };

    if answers.removal_reason != pr_type::NON_INTERFACE_REASON {
        answers.source = Some(Source {
            kind: SourceKind::Collector,
            data: collector::test_url(&answers.feature),
        });
    }

    answers.content_update = prompter.confirm("Is an mdn/content update required?", true)?;
    Ok(())
}

fn ask_source(prompter: &mut dyn Prompter, feature: &str) -> Result<Source, PrError> {
    let labels: Vec<&str> = SourceKind::KNOWN.iter().map(|k| k.label()).collect();
    let question = "Where does this data come from?";
    let kind = match prompter.select(question, &labels, true)? {
        Choice::Other(text) => {
            return Ok(Source {
                kind: SourceKind::Other,
                data: text,
            });
        }
        index => pick(question, index, &SourceKind::KNOWN)?,
    };

    let data = match kind {
        SourceKind::Collector | SourceKind::RuntimeCompat => collector::test_url(feature),
        SourceKind::Manual => fence_test_code(&prompter.text("Test Code", false)?),
        SourceKind::Commit => prompter.text("Link to Commit(s)", false)?,
        SourceKind::Bug => prompter.text("Bug Link(s)", false)?,
        SourceKind::IssueFix => prompter
            .text("What is the issue this fixes?", false)?
            .replace('#', ""),
        SourceKind::EarliestRange => prompter.text(
            "What is the PR (including the #) or commit hash that adds the feature?",
            false,
        )?,
        SourceKind::Mirror | SourceKind::Other => String::new(),
    };
    Ok(Source { kind, data })
}

/// Links are kept as-is; anything else is shown as a code block.
fn fence_test_code(code: &str) -> String {
    if code.starts_with("http") {
        code.to_owned()
    } else {
        format!("\n```\n{}\n```", code.trim())
    }
}
