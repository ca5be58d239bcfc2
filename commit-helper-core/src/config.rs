// configuration - resolved once at startup and passed down explicitly

use crate::error::HelperError;
use crate::CoreCliArgs;
use std::path::PathBuf;

pub const API_KEY_VAR: &str = "GEMINI_API_KEY";
pub const MODEL_VAR: &str = "GEMINI_MODEL";
pub const API_BASE_VAR: &str = "GEMINI_API_BASE";

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// everything a session needs to know up front
#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: String,
    pub model: String,
    pub api_base: String,
    pub repo_path: Option<PathBuf>,
    pub max_diff_chars: usize,
    pub remote: String,
    pub offer_push: bool,
    pub auto_accept: bool,
}

impl Config {
    /// load `.env`, then resolve against the process environment
    pub fn from_env(args: &CoreCliArgs) -> Result<Self, HelperError> {
        dotenv::dotenv().ok();
        Self::resolve(args, |key| std::env::var(key).ok())
    }

    /// resolve against an arbitrary variable lookup; flags beat variables
    pub fn resolve<F>(args: &CoreCliArgs, lookup: F) -> Result<Self, HelperError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_blank = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let api_key = non_blank(API_KEY_VAR)
            .map(|v| v.trim().to_string())
            .ok_or(HelperError::MissingApiKey { var: API_KEY_VAR })?;

        let model = args
            .model
            .clone()
            .or_else(|| non_blank(MODEL_VAR))
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());

        let api_base = non_blank(API_BASE_VAR)
            .unwrap_or_else(|| DEFAULT_API_BASE.to_string())
            .trim_end_matches('/')
            .to_string();

        Ok(Self {
            api_key,
            model,
            api_base,
            repo_path: args.path.clone(),
            max_diff_chars: args.max_diff_chars,
            remote: args.remote.clone(),
            offer_push: !args.no_push,
            auto_accept: args.yes,
        })
    }
}
