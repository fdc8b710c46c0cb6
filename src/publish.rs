//! Branch, commit, push and open the PR, then put the checkout back the way
//! it was.

use tracing::{debug, info, warn};

use crate::answers::Answers;
use crate::assemble::PrContent;
use crate::error::PrError;
use crate::gh::Gh;
use crate::git::Git;
use crate::prompt::{Choice, Prompter};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublishOutcome {
    /// The user backed out because the branch already existed.
    Cancelled,
    /// The PR was opened; `url` is what gh printed.
    Created { url: String },
}

/// What to do when the PR branch already exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Conflict {
    Cancel,
    Force,
    Delete,
}

#[derive(Debug, Clone, Copy)]
struct Existing {
    local: bool,
    remote: bool,
}

pub fn publish(
    git: &Git,
    gh: &Gh,
    content: &PrContent,
    answers: &Answers,
    prompter: &mut dyn Prompter,
) -> Result<PublishOutcome, PrError> {
    let branch = content.branch.as_str();
    let existing = Existing {
        local: git.branch_exists_locally(branch)?,
        remote: git.branch_exists_remotely(branch)?,
    };
    debug!(branch, local = existing.local, remote = existing.remote, "checked for existing branch");

    let force = match resolve_conflict(prompter, existing)? {
        None => false,
        Some(Conflict::Cancel) => {
            prompter.say("PR creation cancelled.")?;
            return Ok(PublishOutcome::Cancelled);
        }
        Some(Conflict::Delete) => {
            if existing.remote {
                prompter.say("Deleting upstream branch...")?;
                git.delete_remote_branch(branch)?;
            }
            if existing.local {
                prompter.say("Deleting local branch...")?;
                git.delete_local_branch(branch, true)?;
            }
            false
        }
        Some(Conflict::Force) => true,
    };

    let original = git.current_branch()?;

    prompter.say("Creating branch...")?;
    git.create_branch(branch, force)?;
    prompter.say("Checking out branch...")?;
    git.checkout(branch)?;

    if answers.auto_stage {
        if let Some(file) = &answers.file {
            prompter.say(&format!("Staging {}...", file.display()))?;
            git.stage(file)?;
        }
    }

    prompter.say("Creating commit...")?;
    git.commit(&content.message())?;

    prompter.pause("Make changes to the commit message and/or press Enter to continue")?;

    prompter.say("Pushing branch...")?;
    git.push_upstream(branch, force)?;
    prompter.say("Creating PR...")?;
    let url = gh.create_pr(&content.labels)?;
    info!(%url, "pull request created");

    restore(git, prompter, &original, branch, answers.auto_stage)?;

    prompter.say("Complete!")?;
    Ok(PublishOutcome::Created { url })
}

/// Ask what to do about an existing branch; `None` when there is none.
fn resolve_conflict(
    prompter: &mut dyn Prompter,
    existing: Existing,
) -> Result<Option<Conflict>, PrError> {
    let (question, delete_label) = if existing.remote {
        ("This branch exists upstream!", "Delete upstream branch and continue")
    } else if existing.local {
        ("This branch exists locally!", "Delete branch and continue")
    } else {
        return Ok(None);
    };

    let options = ["Cancel", "Force push and continue", delete_label];
    Ok(Some(match prompter.select(question, &options, false)? {
        Choice::Index(1) => Conflict::Force,
        Choice::Index(2) => Conflict::Delete,
        _ => Conflict::Cancel,
    }))
}

/// Return to the branch the user started on and drop the local PR branch.
///
/// Without auto-staging, other edits are stashed across the checkout and
/// popped afterwards. Only a stash entry created here is popped.
fn restore(
    git: &Git,
    prompter: &mut dyn Prompter,
    original: &str,
    branch: &str,
    auto_stage: bool,
) -> Result<(), PrError> {
    if original.is_empty() {
        warn!(branch, "started from a detached HEAD; staying on the PR branch");
        prompter.say(&format!("Started from a detached HEAD; staying on {branch}."))?;
        return Ok(());
    }

    let stashed = if auto_stage {
        false
    } else {
        prompter.say("Stashing other changes...")?;
        git.stash()?
    };

    prompter.say("Switching back to original branch...")?;
    git.checkout(original)?;
    prompter.say("Deleting new branch...")?;
    git.delete_local_branch(branch, false)?;

    if stashed {
        prompter.say("Popping stash...")?;
        git.stash_pop()?;
        prompter.say("Resetting state...")?;
        git.reset()?;
    }
    Ok(())
}
