// shell module - runs version-control command lines through the system shell

use console::style;
use encoding_rs::UTF_8;
use std::path::PathBuf;
use std::process::Command;
use tracing::{debug, warn};

/// runs a command line and hands back its standard output
///
/// failures are reported to the user by the executor itself and come back as
/// an empty string, so callers only ever see text.
#[cfg_attr(test, mockall::automock)]
pub trait ShellExecutor {
    fn run(&self, command: &str) -> String;
}

/// executor backed by `sh -c` (or `cmd /C` on windows)
#[derive(Debug, Clone, Default)]
pub struct SystemShell {
    working_dir: Option<PathBuf>,
}

impl SystemShell {
    pub fn new(working_dir: Option<PathBuf>) -> Self {
        Self { working_dir }
    }

    fn command(&self, command_line: &str) -> Command {
        let mut command = if cfg!(windows) {
            let mut c = Command::new("cmd");
            c.args(["/C", command_line]);
            c
        } else {
            let mut c = Command::new("sh");
            c.args(["-c", command_line]);
            c
        };
        if let Some(dir) = &self.working_dir {
            command.current_dir(dir);
        }
        command
    }
}

impl ShellExecutor for SystemShell {
    fn run(&self, command_line: &str) -> String {
        debug!(command = command_line, "running shell command");

        let output = match self.command(command_line).output() {
            Ok(output) => output,
            Err(e) => {
                warn!(command = command_line, error = %e, "failed to spawn shell");
                report_failure(command_line, &e.to_string());
                return String::new();
            }
        };

        if !output.status.success() {
            let stderr = decode_output(&output.stderr);
            warn!(command = command_line, status = %output.status, "shell command failed");
            report_failure(command_line, stderr.trim());
            return String::new();
        }

        decode_output(&output.stdout).trim_end().to_string()
    }
}

/// decode command output, replacing invalid utf-8 sequences
fn decode_output(bytes: &[u8]) -> String {
    let (text, _had_errors) = UTF_8.decode_without_bom_handling(bytes);
    text.into_owned()
}

fn report_failure(command_line: &str, stderr: &str) {
    eprintln!(
        "{} {}",
        style("❌ command failed:").red().bold(),
        style(command_line).red()
    );
    if !stderr.is_empty() {
        eprintln!("{}", style(stderr).red());
    }
}

/// quote a single argument for the platform shell
pub fn quote_arg(arg: &str) -> String {
    if cfg!(windows) {
        format!("\"{}\"", arg.replace('"', "\"\""))
    } else {
        format!("'{}'", arg.replace('\'', r"'\''"))
    }
}
