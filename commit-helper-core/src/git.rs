use crate::shell::{quote_arg, ShellExecutor};
use std::path::Path;
use tracing::debug;

const STAGED_NAMES: &str = "git diff --cached --name-only";
const STAGE_ALL: &str = "git add -A";
const STAGED_DIFF: &str = "git diff --cached --unified=0 --no-color --no-ext-diff";
const CURRENT_BRANCH: &str = "git rev-parse --abbrev-ref HEAD";
const INSIDE_WORK_TREE: &str = "git rev-parse --is-inside-work-tree";

/// appended to a diff that was cut at the character cap
pub const TRUNCATION_MARKER: &str = "\n... [diff truncated]";

/// default character cap for the diff sent to the model
pub const DEFAULT_MAX_DIFF_CHARS: usize = 12_000;

/// the staged diff as it will be sent to the model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagedDiff {
    text: String,
    truncated: bool,
}

impl StagedDiff {
    /// cap `raw` at `max_chars` characters, marking the cut
    pub fn capped(raw: String, max_chars: usize) -> Self {
        match raw.char_indices().nth(max_chars) {
            Some((cut, _)) => {
                let mut text = raw;
                text.truncate(cut);
                text.push_str(TRUNCATION_MARKER);
                Self {
                    text,
                    truncated: true,
                }
            }
            None => Self {
                text: raw,
                truncated: false,
            },
        }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn is_truncated(&self) -> bool {
        self.truncated
    }

    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// result of the staging guard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StagingOutcome {
    /// there were staged changes already
    AlreadyStaged,
    /// nothing was staged, so everything was added and now something is
    AutoStaged,
    /// nothing is staged even after adding everything
    NothingToCommit,
}

/// make sure the index has something to commit, staging everything if empty
pub fn ensure_staged<S: ShellExecutor + ?Sized>(shell: &S) -> StagingOutcome {
    if !staged_files(shell).is_empty() {
        return StagingOutcome::AlreadyStaged;
    }

    debug!("no staged changes, staging the whole working tree");
    shell.run(STAGE_ALL);

    if staged_files(shell).is_empty() {
        StagingOutcome::NothingToCommit
    } else {
        StagingOutcome::AutoStaged
    }
}

/// names of the files currently staged
pub fn staged_files<S: ShellExecutor + ?Sized>(shell: &S) -> Vec<String> {
    shell
        .run(STAGED_NAMES)
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// get the context-free staged diff, capped at `max_chars` characters
pub fn collect_staged_diff<S: ShellExecutor + ?Sized>(shell: &S, max_chars: usize) -> StagedDiff {
    let raw = shell.run(STAGED_DIFF);
    let diff = StagedDiff::capped(raw, max_chars);
    debug!(
        chars = diff.as_str().chars().count(),
        truncated = diff.is_truncated(),
        "collected staged diff"
    );
    diff
}

/// true when the shell is inside a git work tree
pub fn is_inside_work_tree<S: ShellExecutor + ?Sized>(shell: &S) -> bool {
    shell.run(INSIDE_WORK_TREE) == "true"
}

/// the checked-out branch, or `None` when detached or unknown
pub fn current_branch<S: ShellExecutor + ?Sized>(shell: &S) -> Option<String> {
    let branch = shell.run(CURRENT_BRANCH);
    match branch.as_str() {
        "" | "HEAD" => None,
        _ => Some(branch),
    }
}

/// stage tracked modifications and commit with the message in `message_file`
pub fn commit_command(message_file: &Path) -> String {
    format!(
        "git commit -a -F {}",
        quote_arg(&message_file.to_string_lossy())
    )
}

pub fn push_command(remote: &str, branch: &str) -> String {
    format!("git push {} {}", quote_arg(remote), quote_arg(branch))
}
