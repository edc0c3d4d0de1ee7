use std::path::Path;
use std::process::Command;
use tracing::error;

/// Whether an executable with this name is reachable via PATH.
pub fn command_on_path(name: &str) -> bool {
    let Some(paths) = std::env::var_os("PATH") else {
        return false;
    };
    std::env::split_paths(&paths).any(|dir| {
        let candidate = dir.join(name);
        candidate.is_file() || has_exe_sibling(&candidate)
    })
}

#[cfg(windows)]
fn has_exe_sibling(candidate: &Path) -> bool {
    candidate.with_extension("exe").is_file()
}

#[cfg(not(windows))]
fn has_exe_sibling(_candidate: &Path) -> bool {
    false
}

/// Run a command and return stdout on success. Spawn failures and
/// non-zero exits are logged and collapse to None so enumeration can
/// degrade to an empty list.
pub fn run_capture(program: &str, args: &[&str]) -> Option<String> {
    let output = match Command::new(program).args(args).output() {
        Ok(output) => output,
        Err(err) => {
            error!(program, error = %err, "failed to spawn package manager");
            return None;
        }
    };
    if !output.status.success() {
        error!(program, status = %output.status, "package manager query failed");
        return None;
    }
    match String::from_utf8(output.stdout) {
        Ok(stdout) => Some(stdout),
        Err(err) => {
            error!(program, error = %err, "package manager emitted invalid utf-8");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_on_path_misses_nonsense() {
        assert!(!command_on_path("definitely-not-a-real-binary-9f2c"));
    }

    #[test]
    fn test_run_capture_missing_program_is_none() {
        assert!(run_capture("definitely-not-a-real-binary-9f2c", &[]).is_none());
    }

    #[cfg(unix)]
    #[test]
    fn test_run_capture_collects_stdout() {
        let out = run_capture("echo", &["hello"]).unwrap();
        assert_eq!(out.trim(), "hello");
    }
}
