//! Building and running the external search process

use std::future::Future;
use std::path::{Path, PathBuf};
use tokio::process::Command;
use tracing::{debug, warn};

/// A fully resolved search command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchInvocation {
    program: String,
    args: Vec<String>,
    cwd: PathBuf,
}

impl SearchInvocation {
    /// `<program> -e <term> -n ... --glob <pattern>...`, run from `cwd`.
    ///
    /// The term always follows `-e`, so a leading `-` is never read as a flag.
    pub fn build(program: &str, term: &str, patterns: &[String], cwd: &Path) -> Self {
        let mut args: Vec<String> = ["-e", term, "-n", "--with-filename", "--no-heading", "--color", "never"]
            .iter()
            .map(|s| s.to_string())
            .collect();

        for glob in patterns.iter().flat_map(|p| globs_for(p)) {
            args.push("--glob".to_string());
            args.push(glob);
        }

        Self {
            program: program.to_string(),
            args,
            cwd: cwd.to_path_buf(),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    /// Shell-quoted rendering, for logs
    pub fn command_line(&self) -> String {
        let words = std::iter::once(self.program.as_str()).chain(self.args.iter().map(String::as_str));
        shlex::try_join(words.clone()).unwrap_or_else(|_| words.collect::<Vec<_>>().join(" "))
    }
}

/// Globs relative to the workspace root for one manifest pattern.
///
/// The leading `/` is dropped. A directory pattern (`docs/`) covers its
/// contents, and a bare name (`src/app`) covers both itself and anything
/// beneath it.
pub fn globs_for(pattern: &str) -> Vec<String> {
    let relative = pattern.strip_prefix('/').unwrap_or(pattern);
    if relative.is_empty() {
        return vec!["**".to_string()];
    }
    if let Some(dir) = relative.strip_suffix('/') {
        return vec![format!("{dir}/**")];
    }
    if relative.ends_with("**") {
        return vec![relative.to_string()];
    }
    vec![relative.to_string(), format!("{relative}/**")]
}

/// Raw result of one search process
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchOutput {
    pub stdout: String,
    pub stderr: String,
    /// Exit code, if the process ran to completion
    pub status: Option<i32>,
}

/// Capability to execute a search and hand back its raw output
pub trait SearchRunner {
    fn run(&self, invocation: &SearchInvocation) -> impl Future<Output = SearchOutput> + Send;
}

/// Runs the invocation as a child process
#[derive(Debug, Clone, Copy, Default)]
pub struct RipgrepRunner;

impl RipgrepRunner {
    pub fn new() -> Self {
        Self
    }
}

impl SearchRunner for RipgrepRunner {
    async fn run(&self, invocation: &SearchInvocation) -> SearchOutput {
        debug!(
            command = %invocation.command_line(),
            cwd = %invocation.cwd().display(),
            "running search"
        );

        let output = Command::new(invocation.program())
            .args(invocation.args())
            .current_dir(invocation.cwd())
            .kill_on_drop(true)
            .output()
            .await;

        match output {
            Ok(output) => {
                // rg exits 1 when nothing matched; that is not an error for us
                if !output.status.success() {
                    warn!("Error: search exited with {}", output.status);
                }
                SearchOutput {
                    stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
                    stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
                    status: output.status.code(),
                }
            }
            Err(e) => {
                warn!("Error: failed to run {}: {}", invocation.program(), e);
                SearchOutput {
                    stderr: format!("failed to run {}: {}", invocation.program(), e),
                    ..SearchOutput::default()
                }
            }
        }
    }
}
