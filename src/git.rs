//! Git operations used to turn the working tree into a PR branch.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::PrError;
use crate::subprocess::{self, CommandResult};

/// Git invoked in a fixed working directory against a fixed remote.
#[derive(Debug, Clone)]
pub struct Git {
    program: String,
    cwd: PathBuf,
    remote: String,
}

impl Git {
    pub fn new(program: impl Into<String>, cwd: impl Into<PathBuf>, remote: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            cwd: cwd.into(),
            remote: remote.into(),
        }
    }

    /// Run a git step that must succeed.
    fn run<S: AsRef<str>>(&self, step: &str, args: &[S]) -> Result<CommandResult, PrError> {
        let args: Vec<&str> = args.iter().map(|a| a.as_ref()).collect();
        let result = subprocess::run_command(&self.program, &args, &self.cwd).map_err(|e| {
            PrError::CommandSpawnFailed {
                step: step.to_owned(),
                detail: e.to_string(),
            }
        })?;
        if !result.success() {
            return Err(PrError::CommandFailed {
                step: step.to_owned(),
                exit_code: result.exit_code,
                stderr: result.stderr.trim().to_owned(),
            });
        }
        Ok(result)
    }

    /// Run a git query whose exit status is the answer.
    fn probe(&self, step: &str, args: &[&str]) -> Result<bool, PrError> {
        subprocess::run_command(&self.program, args, &self.cwd)
            .map(|r| r.success())
            .map_err(|e| PrError::CommandSpawnFailed {
                step: step.to_owned(),
                detail: e.to_string(),
            })
    }

    /// True inside a work tree; false inside `.git`, outside a repository,
    /// or when git cannot be run.
    pub fn is_work_tree(&self) -> bool {
        match subprocess::run_command(&self.program, &["rev-parse", "--is-inside-work-tree"], &self.cwd) {
            Ok(r) => r.success() && r.stdout.trim() == "true",
            Err(_) => false,
        }
    }

    pub fn branch_exists_locally(&self, branch: &str) -> Result<bool, PrError> {
        let refname = format!("refs/heads/{branch}");
        self.probe(
            "checking local branch",
            &["rev-parse", "--verify", "--quiet", &refname],
        )
    }

    pub fn branch_exists_remotely(&self, branch: &str) -> Result<bool, PrError> {
        self.probe(
            "checking remote branch",
            &["ls-remote", "--exit-code", "--heads", &self.remote, branch],
        )
    }

    pub fn current_branch(&self) -> Result<String, PrError> {
        let out = self.run("reading current branch", &["branch", "--show-current"])?;
        Ok(out.stdout.trim().to_owned())
    }

    /// Whether `path` is untracked (and not ignored).
    pub fn is_untracked(&self, path: &Path) -> Result<bool, PrError> {
        let out = self.run(
            "listing untracked files",
            &["ls-files", "--other", "--exclude-standard"],
        )?;
        let wanted = path.to_string_lossy().replace('\\', "/");
        Ok(out.stdout.lines().any(|line| line.trim() == wanted))
    }

    pub fn create_branch(&self, branch: &str, force: bool) -> Result<(), PrError> {
        debug!(branch, force, "creating branch");
        if force {
            self.run("creating branch", &["branch", "-f", branch])?;
        } else {
            self.run("creating branch", &["branch", branch])?;
        }
        Ok(())
    }

    pub fn checkout(&self, branch: &str) -> Result<(), PrError> {
        debug!(branch, "checking out branch");
        self.run("checking out branch", &["checkout", branch])?;
        Ok(())
    }

    pub fn stage(&self, path: &Path) -> Result<(), PrError> {
        debug!(path = %path.display(), "staging file");
        let path = path.to_string_lossy();
        self.run("staging file", &["add", path.as_ref()])?;
        Ok(())
    }

    pub fn commit(&self, message: &str) -> Result<(), PrError> {
        debug!("creating commit");
        self.run("creating commit", &commit_args(message))?;
        Ok(())
    }

    pub fn push_upstream(&self, branch: &str, force: bool) -> Result<(), PrError> {
        debug!(branch, remote = %self.remote, force, "pushing branch");
        let mut args = vec!["push", "--set-upstream"];
        if force {
            args.push("--force-with-lease");
        }
        args.extend([self.remote.as_str(), branch]);
        self.run("pushing branch", &args)?;
        Ok(())
    }

    /// Delete a local branch. Without `force`, git refuses unmerged branches.
    pub fn delete_local_branch(&self, branch: &str, force: bool) -> Result<(), PrError> {
        debug!(branch, force, "deleting local branch");
        let flag = if force { "-D" } else { "-d" };
        self.run("deleting local branch", &["branch", flag, branch])?;
        Ok(())
    }

    pub fn delete_remote_branch(&self, branch: &str) -> Result<(), PrError> {
        debug!(branch, remote = %self.remote, "deleting remote branch");
        self.run("deleting remote branch", &["push", &self.remote, "--delete", branch])?;
        Ok(())
    }

    /// Stash local changes. Returns whether a new stash entry was created;
    /// a clean tree leaves the stash list untouched.
    pub fn stash(&self) -> Result<bool, PrError> {
        debug!("stashing other changes");
        let before = self.stash_list()?.len();
        self.run("stashing changes", &["stash"])?;
        Ok(self.stash_list()?.len() > before)
    }

    pub fn stash_list(&self) -> Result<Vec<String>, PrError> {
        let out = self.run("listing stashes", &["stash", "list"])?;
        Ok(out
            .stdout
            .lines()
            .filter(|l| !l.trim().is_empty())
            .map(str::to_owned)
            .collect())
    }

    pub fn stash_pop(&self) -> Result<(), PrError> {
        debug!("popping stash");
        self.run("popping stash", &["stash", "pop"])?;
        Ok(())
    }

    pub fn reset(&self) -> Result<(), PrError> {
        debug!("resetting index");
        self.run("resetting index", &["reset"])?;
        Ok(())
    }
}

/// `git commit` argv with one `-m` per line of `message`.
pub fn commit_args(message: &str) -> Vec<String> {
    let mut args = vec!["commit".to_owned()];
    for line in message.split('\n') {
        args.push("-m".to_owned());
        args.push(line.to_owned());
    }
    args
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::fs;
    use std::process::Command;

    fn git_in(dir: &Path, args: &[&str]) {
        let status = Command::new("git")
            .args(args)
            .current_dir(dir)
            .output()
            .expect("git must be installed for these tests")
            .status;
        assert!(status.success(), "git {args:?} failed");
    }

    /// A repository on branch `work` with one empty commit.
    pub(crate) fn init_repo(dir: &Path) {
        git_in(dir, &["init", "-q"]);
        git_in(dir, &["symbolic-ref", "HEAD", "refs/heads/work"]);
        git_in(dir, &["config", "user.name", "Test"]);
        git_in(dir, &["config", "user.email", "test@example.com"]);
        git_in(dir, &["config", "commit.gpgsign", "false"]);
        git_in(dir, &["commit", "-q", "--allow-empty", "-m", "init"]);
    }

    #[test]
    fn commit_args_has_one_m_per_line() {
        let args = commit_args("Title\n\nBody line");
        assert_eq!(args, vec!["commit", "-m", "Title", "-m", "", "-m", "Body line"]);
    }

    #[test]
    fn detects_work_tree() {
        let dir = tempfile::tempdir().unwrap();
        assert!(!Git::new("git", dir.path(), "origin").is_work_tree());
        init_repo(dir.path());
        assert!(Git::new("git", dir.path(), "origin").is_work_tree());
    }

    #[test]
    fn reads_current_branch() {
        let dir = tempfile::tempdir().unwrap();
        init_repo(dir.path());
        let git = Git::new("git", dir.path(), "origin");
        assert_eq!(git.current_branch().unwrap(), "work");
    }

    #[test]
    fn branch_lifecycle() {
        let dir = tempfile::tempdir().unwrap();
        init_repo(dir.path());
        let git = Git::new("git", dir.path(), "origin");

        assert!(!git.branch_exists_locally("api/Foo/chrome").unwrap());
        git.create_branch("api/Foo/chrome", false).unwrap();
        assert!(git.branch_exists_locally("api/Foo/chrome").unwrap());

        let err = git.create_branch("api/Foo/chrome", false).unwrap_err();
        assert!(matches!(err, PrError::CommandFailed { .. }));
        git.create_branch("api/Foo/chrome", true).unwrap();

        git.delete_local_branch("api/Foo/chrome", true).unwrap();
        assert!(!git.branch_exists_locally("api/Foo/chrome").unwrap());
    }

    #[test]
    fn untracked_detection() {
        let dir = tempfile::tempdir().unwrap();
        init_repo(dir.path());
        fs::create_dir_all(dir.path().join("api")).unwrap();
        fs::write(dir.path().join("api/New.json"), "{}").unwrap();
        let git = Git::new("git", dir.path(), "origin");

        assert!(git.is_untracked(Path::new("api/New.json")).unwrap());
        git.stage(Path::new("api/New.json")).unwrap();
        assert!(!git.is_untracked(Path::new("api/New.json")).unwrap());
    }

    #[test]
    fn commit_writes_multi_line_message() {
        let dir = tempfile::tempdir().unwrap();
        init_repo(dir.path());
        fs::write(dir.path().join("a.json"), "{}").unwrap();
        let git = Git::new("git", dir.path(), "origin");

        git.stage(Path::new("a.json")).unwrap();
        git.commit("Add a\n\nThis PR adds a.\n\nBug: 1").unwrap();

        let out = subprocess::run_command("git", &["log", "-1", "--format=%B"], dir.path()).unwrap();
        assert!(out.stdout.starts_with("Add a\n\nThis PR adds a."), "got: {}", out.stdout);
        assert!(out.stdout.contains("Bug: 1"));
    }

    #[test]
    fn stash_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        init_repo(dir.path());
        fs::write(dir.path().join("tracked.txt"), "one").unwrap();
        git_in(dir.path(), &["add", "tracked.txt"]);
        git_in(dir.path(), &["commit", "-q", "-m", "tracked"]);
        let git = Git::new("git", dir.path(), "origin");

        assert!(git.stash_list().unwrap().is_empty());
        fs::write(dir.path().join("tracked.txt"), "two").unwrap();
        assert!(git.stash().unwrap());
        assert_eq!(git.stash_list().unwrap().len(), 1);
        git.stash_pop().unwrap();
        git.reset().unwrap();
        assert!(git.stash_list().unwrap().is_empty());
        assert_eq!(fs::read_to_string(dir.path().join("tracked.txt")).unwrap(), "two");
    }

    #[test]
    fn stash_on_clean_tree_reports_nothing_saved() {
        let dir = tempfile::tempdir().unwrap();
        init_repo(dir.path());
        fs::write(dir.path().join("notes.txt"), "v1").unwrap();
        git_in(dir.path(), &["add", "notes.txt"]);
        git_in(dir.path(), &["commit", "-q", "-m", "notes"]);
        fs::write(dir.path().join("notes.txt"), "older work").unwrap();
        git_in(dir.path(), &["stash", "-q"]);
        let git = Git::new("git", dir.path(), "origin");

        assert!(!git.stash().unwrap());
        assert_eq!(git.stash_list().unwrap().len(), 1);
    }

    #[test]
    fn remote_branch_without_remote_is_false() {
        let dir = tempfile::tempdir().unwrap();
        init_repo(dir.path());
        let git = Git::new("git", dir.path(), "origin");
        assert!(!git.branch_exists_remotely("anything").unwrap());
    }
}
