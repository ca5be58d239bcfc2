// commit step - hand the approved message to git, then offer a push

use crate::git;
use crate::review::Prompter;
use crate::shell::ShellExecutor;
use crate::ui;
use anyhow::{Context, Result};
use std::io::Write;
use tempfile::NamedTempFile;
use tracing::{debug, warn};

/// what happens after the commit
#[derive(Debug, Clone)]
pub struct CommitOptions {
    pub remote: String,
    pub offer_push: bool,
}

impl Default for CommitOptions {
    fn default() -> Self {
        Self {
            remote: "origin".to_string(),
            offer_push: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PushOutcome {
    Pushed { remote: String, branch: String },
    Declined,
    Skipped,
}

/// write `message` plus a trailing newline to a fresh temporary file
///
/// the file is removed when the returned handle is dropped.
pub fn write_message_file(message: &str) -> Result<NamedTempFile> {
    let mut file = tempfile::Builder::new()
        .prefix("commit-msg-")
        .suffix(".txt")
        .tempfile()
        .context("failed to create commit message file")?;
    writeln!(file, "{message}").context("failed to write commit message")?;
    file.flush().context("failed to flush commit message")?;
    Ok(file)
}

/// commit with `message`, then ask whether to push the current branch
pub fn commit_and_push<S, P>(
    shell: &S,
    prompter: &P,
    message: &str,
    options: &CommitOptions,
) -> Result<PushOutcome>
where
    S: ShellExecutor + ?Sized,
    P: Prompter + ?Sized,
{
    {
        let file = write_message_file(message)?;
        debug!(path = %file.path().display(), "committing with message file");
        let output = shell.run(&git::commit_command(file.path()));
        if !output.is_empty() {
            println!("{output}");
        }
    }

    ui::print_framed("✅ commit created with message:", message);

    if !options.offer_push {
        return Ok(PushOutcome::Skipped);
    }

    let Some(branch) = git::current_branch(shell) else {
        warn!("no current branch, not offering to push");
        ui::notice("not on a branch (detached HEAD?), skipping push");
        return Ok(PushOutcome::Skipped);
    };

    if !prompter.confirm_push(&options.remote, &branch)? {
        ui::notice("changes committed locally, not pushed");
        return Ok(PushOutcome::Declined);
    }

    let spinner = ui::spinner(format!("🚀 pushing {branch} to {}...", options.remote));
    shell.run(&git::push_command(&options.remote, &branch));
    spinner.finish_and_clear();
    ui::success(&format!("✅ pushed {branch} to {}", options.remote));

    Ok(PushOutcome::Pushed {
        remote: options.remote.clone(),
        branch,
    })
}
