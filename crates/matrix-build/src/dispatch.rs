//! Build-script invocation.
//!
//! An [`Invocation`] captures the exact command for one build: the build
//! script, the first board of the selected entry, the conventional output
//! directory `out/<app>`, and the entry's arguments in order. The tokens are
//! passed to the child as an argv vector, so no shell quoting applies; the
//! rendered [`command_line`](Invocation::command_line) is the same tokens
//! joined by single spaces.

use anyhow::{bail, Result};
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::matrix::BuildEntry;

/// A single, fully resolved build-script run.
#[derive(Debug, Clone)]
pub struct Invocation {
    script: PathBuf,
    board: String,
    out_dir: String,
    arguments: Vec<String>,
}

impl Invocation {
    /// Resolve `entry` into a concrete command for `app`.
    ///
    /// Only the first board of the entry is built; additional boards are
    /// ignored.
    pub fn new(script: &Path, app: &str, entry: &BuildEntry) -> Result<Self> {
        let Some(board) = entry.boards.first() else {
            bail!("Build entry for {app} lists no boards");
        };
        Ok(Self {
            script: script.to_path_buf(),
            board: board.clone(),
            out_dir: format!("out/{app}"),
            arguments: entry.arguments.clone(),
        })
    }

    /// The command as executed: `<script> <board> out/<app> <args...>`.
    pub fn command_line(&self) -> String {
        let mut line = format!("{} {} {}", self.script.display(), self.board, self.out_dir);
        for arg in &self.arguments {
            line.push(' ');
            line.push_str(arg);
        }
        line
    }

    /// Run the build script, inheriting stdio, and wait for it to finish.
    ///
    /// One attempt, no timeout. A spawn failure and a non-zero exit are both
    /// reported as a build-script failure.
    pub fn run(&self) -> Result<()> {
        eprintln!("[step] {}", self.command_line());
        let status = Command::new(&self.script)
            .arg(&self.board)
            .arg(&self.out_dir)
            .args(&self.arguments)
            .status();
        match status {
            Ok(status) if status.success() => {
                eprintln!("[ok] {} built for {}", self.out_dir, self.board);
                Ok(())
            }
            Ok(status) => bail!(
                "Build script failed with error: {} exited with {status}",
                self.script.display()
            ),
            Err(e) => bail!("Build script failed with error: {e}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(boards: &[&str], arguments: &[&str]) -> BuildEntry {
        BuildEntry {
            boards: boards.iter().map(ToString::to_string).collect(),
            arguments: arguments.iter().map(ToString::to_string).collect(),
        }
    }

    #[test]
    fn test_command_line() {
        let invocation = Invocation::new(
            Path::new("build_script.sh"),
            "exampleApp",
            &entry(&["board1"], &["arg1", "arg2"]),
        )
        .unwrap();
        assert_eq!(
            invocation.command_line(),
            "build_script.sh board1 out/exampleApp arg1 arg2"
        );
    }

    #[test]
    fn test_command_line_without_arguments() {
        let invocation = Invocation::new(
            Path::new("build_script.sh"),
            "exampleApp",
            &entry(&["board1"], &[]),
        )
        .unwrap();
        assert_eq!(invocation.command_line(), "build_script.sh board1 out/exampleApp");
    }

    #[test]
    fn test_only_first_board_is_used() {
        let invocation = Invocation::new(
            Path::new("build_script.sh"),
            "app",
            &entry(&["board1", "board2"], &[]),
        )
        .unwrap();
        assert_eq!(invocation.command_line(), "build_script.sh board1 out/app");
    }

    #[test]
    fn test_empty_boards_is_rejected() {
        let err = Invocation::new(Path::new("build_script.sh"), "app", &entry(&[], &[]))
            .unwrap_err();
        assert_eq!(format!("{err:#}"), "Build entry for app lists no boards");
    }

    #[cfg(unix)]
    #[test]
    fn test_run_success() {
        let invocation =
            Invocation::new(Path::new("true"), "app", &entry(&["board1"], &["arg1"])).unwrap();
        invocation.run().unwrap();
    }

    #[cfg(unix)]
    #[test]
    fn test_run_nonzero_exit() {
        let invocation =
            Invocation::new(Path::new("false"), "app", &entry(&["board1"], &[])).unwrap();
        let err = invocation.run().unwrap_err();
        assert!(format!("{err:#}").starts_with("Build script failed with error:"));
    }

    #[cfg(unix)]
    #[test]
    fn test_run_spawn_failure() {
        let invocation = Invocation::new(
            Path::new("./does-not-exist-anywhere"),
            "app",
            &entry(&["board1"], &[]),
        )
        .unwrap();
        let err = invocation.run().unwrap_err();
        assert!(format!("{err:#}").starts_with("Build script failed with error:"));
    }
}
