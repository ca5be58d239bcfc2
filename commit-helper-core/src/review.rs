// review loop - accept, edit, regenerate or abort the suggested message

use crate::ai::MessageGenerator;
use crate::commit::{self, CommitOptions, PushOutcome};
use crate::git::StagedDiff;
use crate::shell::ShellExecutor;
use crate::ui;
use anyhow::{Context, Result};
use console::style;
use dialoguer::{theme::ColorfulTheme, Confirm, Editor, Select};

/// the four menu entries, in menu order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewChoice {
    Use,
    Edit,
    Regenerate,
    Abort,
}

impl ReviewChoice {
    pub const ALL: [ReviewChoice; 4] = [Self::Use, Self::Edit, Self::Regenerate, Self::Abort];

    pub fn label(self) -> &'static str {
        match self {
            Self::Use => "1) use this message",
            Self::Edit => "2) edit this message",
            Self::Regenerate => "3) regenerate message",
            Self::Abort => "4) abort",
        }
    }
}

/// where a review session stands
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReviewState {
    /// showing a suggestion and waiting for a choice
    Presenting(String),
    /// the message was committed
    Committed { message: String, push: PushOutcome },
    /// the user walked away without committing
    Aborted,
}

impl ReviewState {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Presenting(_))
    }
}

/// the interactive questions a session asks
#[cfg_attr(test, mockall::automock)]
pub trait Prompter {
    fn choose(&self) -> Result<ReviewChoice>;

    /// replacement text for `current`; blank means "no usable edit"
    fn edit(&self, current: &str) -> Result<String>;

    fn confirm_push(&self, remote: &str, branch: &str) -> Result<bool>;
}

/// terminal prompts via dialoguer
pub struct DialoguerPrompter {
    theme: ColorfulTheme,
}

impl DialoguerPrompter {
    pub fn new() -> Self {
        Self {
            theme: ColorfulTheme::default(),
        }
    }
}

impl Default for DialoguerPrompter {
    fn default() -> Self {
        Self::new()
    }
}

impl Prompter for DialoguerPrompter {
    fn choose(&self) -> Result<ReviewChoice> {
        let labels = ReviewChoice::ALL.map(ReviewChoice::label);
        let selection = Select::with_theme(&self.theme)
            .with_prompt("what would you like to do?")
            .default(0)
            .items(&labels)
            .interact_opt()
            .context("failed to read menu choice")?;

        // esc / q leaves the menu
        Ok(selection
            .map(|index| ReviewChoice::ALL[index])
            .unwrap_or(ReviewChoice::Abort))
    }

    fn edit(&self, current: &str) -> Result<String> {
        println!("{}", style("opening editor for commit message...").cyan());
        let edited = Editor::new()
            .extension(".txt")
            .edit(current)
            .context("failed to open editor")?;
        Ok(edited.unwrap_or_default())
    }

    fn confirm_push(&self, remote: &str, branch: &str) -> Result<bool> {
        Confirm::with_theme(&self.theme)
            .with_prompt(format!("push {branch} to {remote}?"))
            .default(true)
            .show_default(true)
            .wait_for_newline(true)
            .interact()
            .context("failed to read push confirmation")
    }
}

/// one review session over a fixed diff
pub struct ReviewSession<'a, S: ?Sized, G: ?Sized, P: ?Sized> {
    shell: &'a S,
    generator: &'a G,
    prompter: &'a P,
    options: CommitOptions,
}

impl<'a, S, G, P> ReviewSession<'a, S, G, P>
where
    S: ShellExecutor + ?Sized,
    G: MessageGenerator + ?Sized,
    P: Prompter + ?Sized,
{
    pub fn new(shell: &'a S, generator: &'a G, prompter: &'a P, options: CommitOptions) -> Self {
        Self {
            shell,
            generator,
            prompter,
            options,
        }
    }

    /// present `initial` and keep going until the session commits or aborts
    pub async fn run(&self, diff: &StagedDiff, initial: String) -> Result<ReviewState> {
        let mut state = ReviewState::Presenting(initial);
        while !state.is_terminal() {
            state = self.step(diff, state).await?;
        }
        Ok(state)
    }

    /// apply a single menu choice to `state`
    pub async fn step(&self, diff: &StagedDiff, state: ReviewState) -> Result<ReviewState> {
        let ReviewState::Presenting(message) = state else {
            return Ok(state);
        };

        ui::print_framed("✅ suggested commit message:", &message);

        match self.prompter.choose()? {
            ReviewChoice::Use => self.commit(message),
            ReviewChoice::Edit => {
                let edited = self.prompter.edit(&message)?;
                let edited = edited.trim();
                if edited.is_empty() {
                    ui::error("commit message cannot be empty, keeping the previous suggestion");
                    return Ok(ReviewState::Presenting(message));
                }
                self.commit(edited.to_string())
            }
            ReviewChoice::Regenerate => {
                println!("\n{}", style("regenerating...").cyan());
                let regenerated = self
                    .generator
                    .generate(diff.as_str())
                    .await
                    .context("failed to regenerate commit message")?;
                Ok(ReviewState::Presenting(regenerated))
            }
            ReviewChoice::Abort => {
                ui::notice("commit aborted, nothing was committed");
                Ok(ReviewState::Aborted)
            }
        }
    }

    fn commit(&self, message: String) -> Result<ReviewState> {
        println!("{}", style("proceeding with commit...").green());
        let push = commit::commit_and_push(self.shell, self.prompter, &message, &self.options)?;
        Ok(ReviewState::Committed { message, push })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::api::MockMessageGenerator;
    use crate::shell::MockShellExecutor;
    use std::path::PathBuf;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    const DIFF: &str = "diff --git a/login.rs b/login.rs\n+fn login() {}\n+// 50 chars!!";

    fn diff() -> StagedDiff {
        StagedDiff::capped(DIFF.to_string(), 12_000)
    }

    fn no_push() -> CommitOptions {
        CommitOptions {
            offer_push: false,
            ..CommitOptions::default()
        }
    }

    /// prompter that answers the menu from a script
    fn scripted(choices: Vec<ReviewChoice>) -> MockPrompter {
        let next = AtomicUsize::new(0);
        let mut prompter = MockPrompter::new();
        prompter
            .expect_choose()
            .times(choices.len())
            .returning(move || Ok(choices[next.fetch_add(1, Ordering::SeqCst)]));
        prompter
    }

    /// shell that accepts one commit and records the message file it was given
    fn recording_shell(seen: Arc<Mutex<Vec<(PathBuf, String)>>>) -> MockShellExecutor {
        let mut shell = MockShellExecutor::new();
        shell
            .expect_run()
            .withf(|cmd| cmd.starts_with("git commit -a -F "))
            .returning(move |cmd| {
                let raw = cmd.trim_start_matches("git commit -a -F ");
                let path = PathBuf::from(raw.trim_matches(|c: char| c == '\'' || c == '"'));
                let contents = std::fs::read_to_string(&path).unwrap();
                seen.lock().unwrap().push((path, contents));
                String::new()
            });
        shell
    }

    #[tokio::test]
    async fn use_commits_the_exact_reply_then_asks_about_pushing() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut shell = recording_shell(Arc::clone(&seen));
        shell
            .expect_run()
            .withf(|cmd| cmd.starts_with("git rev-parse --abbrev-ref"))
            .returning(|_| "main".to_string());

        let mut prompter = scripted(vec![ReviewChoice::Use]);
        prompter
            .expect_confirm_push()
            .times(1)
            .returning(|_, _| Ok(false));

        let mut generator = MockMessageGenerator::new();
        generator.expect_generate().never();

        let session = ReviewSession::new(&shell, &generator, &prompter, CommitOptions::default());
        let state = session
            .run(&diff(), "feat: add login\n\nbody".to_string())
            .await
            .unwrap();

        assert_eq!(
            state,
            ReviewState::Committed {
                message: "feat: add login\n\nbody".to_string(),
                push: PushOutcome::Declined,
            }
        );

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].1, "feat: add login\n\nbody\n");
        assert!(!seen[0].0.exists());
    }

    #[tokio::test]
    async fn blank_edit_keeps_the_suggestion_and_never_commits() {
        let mut shell = MockShellExecutor::new();
        shell.expect_run().never();

        let mut prompter = scripted(vec![ReviewChoice::Edit]);
        prompter
            .expect_edit()
            .times(1)
            .returning(|_| Ok("  \n\t ".to_string()));

        let mut generator = MockMessageGenerator::new();
        generator.expect_generate().never();

        let session = ReviewSession::new(&shell, &generator, &prompter, no_push());
        let state = session
            .step(&diff(), ReviewState::Presenting("fix: keep me".to_string()))
            .await
            .unwrap();

        assert_eq!(state, ReviewState::Presenting("fix: keep me".to_string()));
    }

    #[tokio::test]
    async fn blank_edit_then_abort_ends_without_a_commit() {
        let mut shell = MockShellExecutor::new();
        shell.expect_run().never();

        let mut prompter = scripted(vec![ReviewChoice::Edit, ReviewChoice::Abort]);
        prompter.expect_edit().returning(|_| Ok(String::new()));

        let generator = MockMessageGenerator::new();

        let session = ReviewSession::new(&shell, &generator, &prompter, no_push());
        let state = session.run(&diff(), "fix: x".to_string()).await.unwrap();
        assert_eq!(state, ReviewState::Aborted);
    }

    #[tokio::test]
    async fn edit_commits_the_trimmed_replacement() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let shell = recording_shell(Arc::clone(&seen));

        let mut prompter = scripted(vec![ReviewChoice::Edit]);
        prompter
            .expect_edit()
            .withf(|current| current == "feat: first draft")
            .returning(|_| Ok("\nfeat(auth): add login form\n\n- validate input\n".to_string()));

        let generator = MockMessageGenerator::new();

        let session = ReviewSession::new(&shell, &generator, &prompter, no_push());
        let state = session
            .run(&diff(), "feat: first draft".to_string())
            .await
            .unwrap();

        assert_eq!(
            state,
            ReviewState::Committed {
                message: "feat(auth): add login form\n\n- validate input".to_string(),
                push: PushOutcome::Skipped,
            }
        );
        let seen = seen.lock().unwrap();
        assert_eq!(seen[0].1, "feat(auth): add login form\n\n- validate input\n");
        assert!(!seen[0].0.exists());
    }

    #[tokio::test]
    async fn regenerate_replaces_the_message_and_reuses_the_diff() {
        let mut shell = MockShellExecutor::new();
        shell.expect_run().never();

        let calls = AtomicUsize::new(0);
        let mut generator = MockMessageGenerator::new();
        generator
            .expect_generate()
            .withf(|diff| diff == DIFF)
            .times(2)
            .returning(move |_| {
                let n = calls.fetch_add(1, Ordering::SeqCst);
                Ok(format!("chore: attempt {}", n + 2))
            });

        let prompter = scripted(vec![ReviewChoice::Regenerate, ReviewChoice::Regenerate]);
        let session = ReviewSession::new(&shell, &generator, &prompter, no_push());
        let staged = diff();

        let state = session
            .step(&staged, ReviewState::Presenting("chore: attempt 1".to_string()))
            .await
            .unwrap();
        assert_eq!(state, ReviewState::Presenting("chore: attempt 2".to_string()));

        let state = session.step(&staged, state).await.unwrap();
        assert_eq!(state, ReviewState::Presenting("chore: attempt 3".to_string()));
        assert_eq!(staged.as_str(), DIFF);
    }

    #[tokio::test]
    async fn failed_regeneration_ends_the_session() {
        let shell = MockShellExecutor::new();
        let mut generator = MockMessageGenerator::new();
        generator
            .expect_generate()
            .returning(|_| Err(anyhow::anyhow!("quota exceeded")));

        let prompter = scripted(vec![ReviewChoice::Regenerate]);
        let session = ReviewSession::new(&shell, &generator, &prompter, no_push());

        let err = session
            .run(&diff(), "chore: x".to_string())
            .await
            .unwrap_err();
        assert!(format!("{err:#}").contains("quota exceeded"));
    }

    #[tokio::test]
    async fn terminal_states_are_left_alone() {
        let shell = MockShellExecutor::new();
        let generator = MockMessageGenerator::new();
        let mut prompter = MockPrompter::new();
        prompter.expect_choose().never();

        let session = ReviewSession::new(&shell, &generator, &prompter, no_push());
        let state = session.step(&diff(), ReviewState::Aborted).await.unwrap();
        assert_eq!(state, ReviewState::Aborted);
    }

    #[test]
    fn menu_defaults_to_use() {
        assert_eq!(ReviewChoice::ALL[0], ReviewChoice::Use);
        assert!(ReviewChoice::ALL[0].label().starts_with("1)"));
        assert!(ReviewChoice::ALL[3].label().starts_with("4)"));
    }
}
