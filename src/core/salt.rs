// Author Dustin Pilgrim
// License: MIT

use crate::log::Log;
use std::{
    path::Path,
    process::{Command, Stdio},
};

/// Clone the states repository unless the checkout already exists. `devm init`
/// never pulls here; refreshing an existing clone is `devm update`'s job.
pub fn ensure_clone(log: &Log, url: &str, dest: &Path) -> Result<(), String> {
    if dest.exists() {
        log.info(format!("salt states already cloned at {}", dest.display()));
        return Ok(());
    }

    if let Some(dir) = dest.parent() {
        std::fs::create_dir_all(dir)
            .map_err(|e| format!("failed to create {}: {e}", dir.display()))?;
    }

    log.step(format!("cloning salt states into {}", dest.display()));
    if log.verbose && !log.quiet {
        log.exec(format!("git clone {url} {}", dest.display()));
    }

    let mut cmd = Command::new("git");
    cmd.arg("clone").arg(url).arg(dest).stdin(Stdio::null());

    if log.verbose && !log.quiet {
        cmd.stdout(Stdio::inherit());
        cmd.stderr(Stdio::inherit());
    } else {
        cmd.stdout(Stdio::null());
        cmd.stderr(Stdio::null());
    }

    let status = cmd
        .status()
        .map_err(|e| format!("failed to run git clone: {e}"))?;

    if status.success() {
        Ok(())
    } else {
        Err(format!("git clone {url} failed"))
    }
}

/// Fast-forward an existing states checkout.
pub fn pull(log: &Log, repo: &Path) -> Result<(), String> {
    let git_dir = repo.join(".git");
    if !git_dir.exists() {
        return Err(format!(
            "salt states at {} is not a git repo (missing .git); cannot pull",
            repo.display()
        ));
    }

    if log.verbose && !log.quiet {
        log.exec(format!("(cd {}) && git pull", repo.display()));
    }

    let mut cmd = Command::new("git");
    cmd.current_dir(repo).arg("pull").stdin(Stdio::null());

    if log.verbose && !log.quiet {
        cmd.stdout(Stdio::inherit());
        cmd.stderr(Stdio::inherit());
    } else {
        cmd.stdout(Stdio::null());
        cmd.stderr(Stdio::null());
    }

    let status = cmd
        .status()
        .map_err(|e| format!("failed to run git pull: {e}"))?;

    if status.success() {
        Ok(())
    } else {
        Err(format!("git pull failed in {}", repo.display()))
    }
}
