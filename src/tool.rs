//! Typed invocation of the external tool binaries.
//!
//! Every child process this crate spawns goes through [`run()`], which blocks until the tool
//! exits and hands back a [`ToolOutput`] with the exit status and both captured streams.
//! Callers decide explicitly what a non-zero exit means; nothing in here panics or retries.
//!
//! [`run()`]: ./fn.run.html
//! [`ToolOutput`]: ./struct.ToolOutput.html

use error::{ErrorKind, Result, ResultExt};

use std::process::{Command, ExitStatus, Output, Stdio};

/// Exit status and captured streams of one finished tool invocation.
#[derive(Debug)]
pub struct ToolOutput {
    pub status: ExitStatus,
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
}

/// Runs an external tool to completion, capturing stdout and stderr.
///
/// # Errors
///
/// Fails only when the tool cannot be launched at all (missing binary, permissions). A tool
/// that launches and exits non-zero is *not* an error here; the caller inspects the returned
/// status.
pub fn run(tool: &'static str, cmd: &mut Command) -> Result<ToolOutput> {
    debug!("executing {:?}", cmd);
    let output = cmd.stdin(Stdio::null()).output().chain_err(|| format!("cannot launch `{}`", tool))?;
    Ok(ToolOutput::from(output))
}

impl From<Output> for ToolOutput {
    fn from(output: Output) -> ToolOutput {
        ToolOutput {
            status: output.status,
            stdout: output.stdout,
            stderr: output.stderr,
        }
    }
}

impl ToolOutput {
    /// Whether the tool exited with status zero.
    pub fn success(&self) -> bool {
        self.status.success()
    }

    /// Checks whether either captured stream contains `needle`.
    pub fn contains(&self, needle: &str) -> bool {
        let needle = needle.as_bytes();
        find_bytes(&self.stdout, needle) || find_bytes(&self.stderr, needle)
    }

    /// Both captured streams as lossy UTF-8, stdout first.
    pub fn text(&self) -> String {
        let mut text = String::from_utf8_lossy(&self.stdout).into_owned();
        if !self.stderr.is_empty() {
            if !text.is_empty() && !text.ends_with('\n') {
                text.push('\n');
            }
            text.push_str(&String::from_utf8_lossy(&self.stderr));
        }
        text
    }

    /// Turns a non-zero exit into [`ToolFailed`], logging the captured output first.
    ///
    /// [`ToolFailed`]: ../error/enum.ErrorKind.html#variant.ToolFailed
    pub fn ensure_success(self, tool: &'static str) -> Result<ToolOutput> {
        if self.success() {
            Ok(self)
        } else {
            error!("`{}` failed, captured output follows:\n{}", tool, self.text());
            Err(ErrorKind::ToolFailed(tool, self.status).into())
        }
    }
}

fn find_bytes(haystack: &[u8], needle: &[u8]) -> bool {
    if needle.is_empty() {
        return true;
    }
    if haystack.len() < needle.len() {
        return false;
    }
    haystack.windows(needle.len()).any(|window| window == needle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use error::ErrorKind;

    #[cfg(unix)]
    #[test]
    fn contains_searches_both_streams() {
        let output = ToolOutput {
            status: exit_status(0),
            stdout: b"all fine".to_vec(),
            stderr: b"genhtml: WARNING: no valid records found in tracefile".to_vec(),
        };
        assert!(output.contains("all fine"));
        assert!(output.contains("no valid records"));
        assert!(!output.contains("cannot read"));
    }

    #[cfg(unix)]
    #[test]
    fn text_joins_the_streams_with_a_newline() {
        let output = ToolOutput {
            status: exit_status(0),
            stdout: b"out".to_vec(),
            stderr: b"err".to_vec(),
        };
        assert_eq!(output.text(), "out\nerr");
    }

    #[cfg(unix)]
    fn exit_status(code: i32) -> ::std::process::ExitStatus {
        use std::os::unix::process::ExitStatusExt;
        ::std::process::ExitStatus::from_raw(code << 8)
    }

    #[cfg(unix)]
    #[test]
    fn run_captures_streams_and_status() {
        let mut cmd = Command::new("sh");
        cmd.arg("-c").arg("echo visible; echo hidden >&2");
        let output = run("sh", &mut cmd).expect("launch sh");
        assert!(output.success());
        assert!(output.contains("visible"));
        assert!(output.contains("hidden"));
    }

    #[cfg(unix)]
    #[test]
    fn nonzero_exit_becomes_tool_failed() {
        let mut cmd = Command::new("sh");
        cmd.arg("-c").arg("exit 3");
        let output = run("sh", &mut cmd).expect("launch sh");
        match output.ensure_success("sh") {
            Err(ref e) => match *e.kind() {
                ErrorKind::ToolFailed(tool, status) => {
                    assert_eq!(tool, "sh");
                    assert_eq!(status.code(), Some(3));
                }
                ref kind => panic!("unexpected error kind {:?}", kind),
            },
            Ok(_) => panic!("exit 3 should be a failure"),
        }
    }

    #[cfg(unix)]
    #[test]
    fn missing_binary_is_a_launch_error() {
        let mut cmd = Command::new("/nonexistent/definitely-not-a-tool");
        assert!(run("ghost", &mut cmd).is_err());
    }
}
