// commit-helper-core/src/lib.rs

// declare modules
pub mod ai;
pub mod commit;
pub mod config;
pub mod error;
pub mod git;
pub mod review;
pub mod shell;
pub mod ui;

// re-export key structs/functions for external use by other crates
pub use anyhow::{Context, Result}; // re-export for convenience
pub use clap::Parser; // re-export Parser for CLI crate
pub use console::style; // re-export for the CLI crate's own printing

pub use crate::ai::{GeminiGenerator, MessageGenerator};
pub use crate::commit::{CommitOptions, PushOutcome};
pub use crate::config::Config;
pub use crate::error::HelperError;
pub use crate::git::{StagedDiff, StagingOutcome};
pub use crate::review::{DialoguerPrompter, Prompter, ReviewChoice, ReviewSession, ReviewState};
pub use crate::shell::{ShellExecutor, SystemShell};

use std::path::PathBuf;
use tracing::info;

// argument parsing struct - shared by the CLI and the tests
#[derive(Parser, Debug, Clone)]
#[command(name = "git-commit-helper")]
#[command(version)]
#[command(about = "draft a conventional commit message for the staged changes with gemini, review it, commit and push", long_about = None)]
pub struct CoreCliArgs {
    /// path to git repository (defaults to current directory)
    #[arg(short, long)]
    pub path: Option<PathBuf>,

    /// gemini model to use (overrides GEMINI_MODEL)
    #[arg(short, long)]
    pub model: Option<String>,

    /// maximum number of diff characters sent to the model
    #[arg(long, default_value_t = git::DEFAULT_MAX_DIFF_CHARS)]
    pub max_diff_chars: usize,

    /// remote to push to after committing
    #[arg(short, long, default_value = "origin")]
    pub remote: String,

    /// never offer to push after committing
    #[arg(long)]
    pub no_push: bool,

    /// commit the first suggestion without showing the review menu
    #[arg(short = 'y', long)]
    pub yes: bool,

    /// show debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

/// how a session ended without an error
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlowOutcome {
    NothingToCommit,
    Committed { message: String, push: PushOutcome },
    Aborted,
}

/// the whole session: staging, diff, generation, review, commit and push
pub async fn execute_commit_helper_flow(args: CoreCliArgs) -> Result<FlowOutcome> {
    // credential first, before touching git
    let config = Config::from_env(&args)?;

    which::which("git").map_err(|_| HelperError::GitNotFound)?;

    ui::banner();

    let shell = SystemShell::new(config.repo_path.clone());
    if !git::is_inside_work_tree(&shell) {
        return Err(HelperError::NotARepository.into());
    }

    let generator = GeminiGenerator::new(&config)?;
    let prompter = DialoguerPrompter::new();

    run_session(&config, &shell, &generator, &prompter).await
}

/// everything after startup checks, over injectable seams
pub async fn run_session<S, G, P>(
    config: &Config,
    shell: &S,
    generator: &G,
    prompter: &P,
) -> Result<FlowOutcome>
where
    S: ShellExecutor + ?Sized,
    G: MessageGenerator + ?Sized,
    P: Prompter + ?Sized,
{
    match git::ensure_staged(shell) {
        StagingOutcome::NothingToCommit => {
            ui::notice("no changes to commit, the working tree is clean");
            return Ok(FlowOutcome::NothingToCommit);
        }
        StagingOutcome::AutoStaged => {
            println!("{}", style("nothing was staged, so all changes were staged automatically").cyan());
        }
        StagingOutcome::AlreadyStaged => {}
    }

    let files = git::staged_files(shell);
    if !files.is_empty() {
        println!("{}\n", style("staged files:").cyan().bold());
        for file in &files {
            println!("{}", style(format!("  - {file}")).green());
        }
        println!();
    }

    let diff = git::collect_staged_diff(shell, config.max_diff_chars);
    if diff.is_empty() {
        ui::notice("the staged diff is empty, nothing to describe");
        return Ok(FlowOutcome::NothingToCommit);
    }
    if diff.is_truncated() {
        ui::notice(&format!(
            "the diff is longer than {} characters and was truncated",
            config.max_diff_chars
        ));
    }

    let message = generator
        .generate(diff.as_str())
        .await
        .context("failed to generate commit message")?;
    info!(model = %config.model, "generated commit message");

    let options = CommitOptions {
        remote: config.remote.clone(),
        offer_push: config.offer_push,
    };

    let state = if config.auto_accept {
        println!("{}", style("--yes flag detected, committing the generated message.").green());
        let push = commit::commit_and_push(shell, prompter, &message, &options)?;
        ReviewState::Committed { message, push }
    } else {
        println!("{}", style("press ctrl+c at any time to exit").dim());
        ReviewSession::new(shell, generator, prompter, options)
            .run(&diff, message)
            .await?
    };

    Ok(match state {
        ReviewState::Committed { message, push } => FlowOutcome::Committed { message, push },
        ReviewState::Aborted | ReviewState::Presenting(_) => FlowOutcome::Aborted,
    })
}
