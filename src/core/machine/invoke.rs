// Author Dustin Pilgrim
// License: MIT

use crate::log::Log;
use std::{
    ffi::OsString,
    path::Path,
    process::{Command, Stdio},
};

/// Exit of a vagrant invocation. Spawning the process at all is a separate,
/// always-fatal failure (`Err` from [`vagrant`]); a non-zero exit is data the
/// call site interprets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CmdOutcome {
    Success,
    Failed { code: i32 },
}

/// Run the vagrant executable with the given args, inheriting the terminal.
/// Vagrant resolves the Vagrantfile from the process working directory, so
/// callers enter the machine directory first.
pub fn vagrant(log: &Log, bin: &Path, args: Vec<OsString>) -> Result<CmdOutcome, String> {
    if log.verbose && !log.quiet {
        let mut s = bin.display().to_string();
        for a in &args {
            s.push(' ');
            s.push_str(&a.to_string_lossy());
        }
        log.exec(s);
    }

    match Command::new(bin)
        .args(args)
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()
    {
        Ok(status) => {
            if status.success() {
                Ok(CmdOutcome::Success)
            } else {
                Ok(CmdOutcome::Failed {
                    code: status.code().unwrap_or(1),
                })
            }
        }
        Err(e) => Err(format!("failed to run {}: {e}", bin.display())),
    }
}

/// Map a non-zero exit to a fatal error. `vagrant ssh` deliberately skips
/// this; interactive sessions exit non-zero routinely.
pub fn require_success(outcome: CmdOutcome, what: &str) -> Result<(), String> {
    match outcome {
        CmdOutcome::Success => Ok(()),
        CmdOutcome::Failed { code } => Err(format!("{what} exited with status {code}")),
    }
}

pub fn args(parts: &[&str]) -> Vec<OsString> {
    parts.iter().map(|p| OsString::from(*p)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn require_success_passes_success_through() {
        assert!(require_success(CmdOutcome::Success, "vagrant up").is_ok());
    }

    #[test]
    fn require_success_reports_exit_code() {
        let err = require_success(CmdOutcome::Failed { code: 3 }, "vagrant halt").unwrap_err();
        assert!(err.contains("vagrant halt"));
        assert!(err.contains('3'));
    }
}
