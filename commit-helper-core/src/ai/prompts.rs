// prompt construction - fixed instructions followed by the staged diff

/// instructions sent ahead of every diff
pub const COMMIT_INSTRUCTIONS: &str = "\
you are writing a git commit message for the staged changes shown below.

follow the conventional commits format exactly:
1. first line: type(scope): subject
   - type is one of feat, fix, docs, style, refactor, perf, test, build, ci, chore, revert
   - scope is optional and names the area of the code that changed
   - subject is imperative, lowercase, has no trailing period, and the whole line is at most 72 characters
2. then one blank line
3. then a body explaining what changed and why
   - wrap body lines at 80 characters
   - when there are several points, write each one as a bullet starting with \"- \"
4. output only the commit message: no code fences, no quotes, no commentary

staged diff (no context lines):
";

/// full prompt for one generation attempt
pub fn build_prompt(diff: &str) -> String {
    let mut prompt = String::with_capacity(COMMIT_INSTRUCTIONS.len() + diff.len() + 1);
    prompt.push_str(COMMIT_INSTRUCTIONS);
    prompt.push('\n');
    prompt.push_str(diff);
    prompt
}
