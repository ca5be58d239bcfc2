// error module - fatal failures that end a session with a nonzero exit

use thiserror::Error;

/// fatal conditions the cli knows how to explain
///
/// these travel inside `anyhow::Error`; callers recover them with
/// `downcast_ref` when they want to print tailored guidance.
#[derive(Debug, Error)]
pub enum HelperError {
    #[error("{var} is not set")]
    MissingApiKey { var: &'static str },

    #[error("git executable not found on PATH")]
    GitNotFound,

    #[error("not inside a git repository")]
    NotARepository,

    #[error("commit message generation failed: {0}")]
    Generation(String),

    #[error("the model returned an empty commit message")]
    EmptyResponse,
}

impl HelperError {
    /// a hint printed under the error, if there is one
    pub fn guidance(&self) -> Option<String> {
        match self {
            Self::MissingApiKey { var } => Some(format!(
                "set it with: export {var}=your-api-key (or add it to a .env file in the repository root)"
            )),
            Self::GitNotFound => Some("install git and make sure it is on your PATH".to_string()),
            Self::NotARepository => {
                Some("run this command inside a git repository, or pass --path".to_string())
            }
            Self::Generation(_) | Self::EmptyResponse => None,
        }
    }
}
