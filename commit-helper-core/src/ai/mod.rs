// ai module - prompt building and the remote model call

pub mod api;
pub mod prompts;

// re-export key public items for convenient access
pub use api::{GeminiGenerator, MessageGenerator};
pub use prompts::{build_prompt, COMMIT_INSTRUCTIONS};
