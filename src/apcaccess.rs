use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use std::thread;
use std::time::Duration;

use log::debug;

/// Where apcupsd installs its status tool.
pub const DEFAULT_APCACCESS_PATH: &str = "/sbin/apcaccess";

#[derive(Debug, thiserror::Error)]
pub enum InvocationError {
    #[error("failed to run {}: {source}", .path.display())]
    Spawn {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("{} exited with status {code}", .path.display())]
    ExitStatus { path: PathBuf, code: i32 },
    #[error("{} was terminated by a signal", .path.display())]
    Signal { path: PathBuf },
}

const SPAWN_ATTEMPTS: u32 = 5;
const BUSY_RETRY_DELAY: Duration = Duration::from_millis(20);

/// `exec` refuses a binary that some process still holds open for writing.
fn is_text_busy(err: &io::Error) -> bool {
    err.raw_os_error() == Some(libc::ETXTBSY)
}

fn spawn_output(path: &Path) -> io::Result<Output> {
    let mut attempt = 1;
    loop {
        match Command::new(path).output() {
            Err(err) if is_text_busy(&err) && attempt < SPAWN_ATTEMPTS => {
                debug!("{} is busy, retrying ({attempt}/{SPAWN_ATTEMPTS})", path.display());
                thread::sleep(BUSY_RETRY_DELAY);
                attempt += 1;
            }
            result => return result,
        }
    }
}

/// Run the status tool without arguments and return its standard output.
///
/// Blocks until the tool exits; a non-zero exit status is an error and the
/// output is discarded.
pub fn run_status_tool(path: &Path) -> Result<String, InvocationError> {
    debug!("Running {}", path.display());
    let output = spawn_output(path).map_err(|source| InvocationError::Spawn {
        path: path.to_path_buf(),
        source,
    })?;

    match output.status.code() {
        Some(0) => {}
        Some(code) => {
            return Err(InvocationError::ExitStatus {
                path: path.to_path_buf(),
                code,
            })
        }
        None => {
            return Err(InvocationError::Signal {
                path: path.to_path_buf(),
            })
        }
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::os::unix::fs::PermissionsExt;

    fn write_script(dir: &Path, body: &str) -> PathBuf {
        let path = dir.join("apcaccess");
        fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    #[test]
    fn captures_stdout_on_success() {
        let tmp = tempfile::tempdir().unwrap();
        let tool = write_script(tmp.path(), "printf 'STATUS   : ONLINE \\n'");
        assert_eq!(run_status_tool(&tool).unwrap(), "STATUS   : ONLINE \n");
    }

    #[test]
    fn non_zero_exit_is_an_error() {
        let tmp = tempfile::tempdir().unwrap();
        let tool = write_script(tmp.path(), "echo 'NOMPOWER : 330 Watts'\nexit 1");
        let err = run_status_tool(&tool).unwrap_err();
        assert!(matches!(err, InvocationError::ExitStatus { code: 1, .. }));
        assert!(err.to_string().contains("exited with status 1"));
    }

    #[test]
    fn only_text_busy_errors_are_retried() {
        assert!(is_text_busy(&io::Error::from_raw_os_error(libc::ETXTBSY)));
        assert!(!is_text_busy(&io::Error::from_raw_os_error(libc::ENOENT)));
        assert!(!is_text_busy(&io::Error::new(io::ErrorKind::Other, "busy")));
    }

    #[test]
    fn missing_tool_is_an_error() {
        let tmp = tempfile::tempdir().unwrap();
        let err = run_status_tool(&tmp.path().join("missing")).unwrap_err();
        assert!(matches!(err, InvocationError::Spawn { .. }));
    }
}
