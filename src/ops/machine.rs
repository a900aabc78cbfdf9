// Author Dustin Pilgrim
// License: MIT

use crate::{
    config::Config,
    core::{machine::Machine, salt, store::Store},
    log::Log,
    paths, prompt,
};
use std::{fs, path::Path, process::ExitCode};

/// Bootstrap a machine end to end. Every setup step is an existence-checked
/// skip, so an interrupted init can simply be re-run.
pub fn init(log: &Log, cfg: &Config, yes: bool, image: &Path, workdir: &Path) -> ExitCode {
    let cfg_dir = match paths::config_dir() {
        Ok(d) => d,
        Err(e) => {
            log.error(e);
            return ExitCode::from(2);
        }
    };
    if let Err(e) = fs::create_dir_all(&cfg_dir) {
        log.error(format!("failed to create {}: {e}", cfg_dir.display()));
        return ExitCode::from(2);
    }

    // Check the image before touching anything else; a typo'd path must not
    // leave directories or clones behind.
    if !image.exists() {
        log.error(format!("{} does not exist!", image.display()));
        return ExitCode::from(1);
    }

    if !workdir.exists() {
        if !yes && !prompt::confirm(&format!("create directory {}", workdir.display())) {
            log.info("aborted.");
            return ExitCode::SUCCESS;
        }
        if let Err(e) = fs::create_dir_all(workdir) {
            log.error(format!(
                "failed to create working directory {}: {e}",
                workdir.display()
            ));
            return ExitCode::from(1);
        }
    }

    let salt_dir = match paths::salt_repo_path() {
        Ok(d) => d,
        Err(e) => {
            log.error(e);
            return ExitCode::from(2);
        }
    };
    if let Err(e) = salt::ensure_clone(log, &cfg.salt_repo, &salt_dir) {
        log.error(e);
        return ExitCode::from(1);
    }

    let store = match Store::open_default() {
        Ok(s) => s,
        Err(e) => {
            log.error(e);
            return ExitCode::from(2);
        }
    };
    let machine = Machine::new(cfg, store);

    let machine_dir = match machine.write_descriptor(log, workdir, &salt_dir) {
        Ok(d) => d,
        Err(e) => {
            log.error(e);
            return ExitCode::from(1);
        }
    };

    if let Err(e) = machine.boot(log, image, &machine_dir) {
        log.error(e);
        return ExitCode::from(1);
    }

    if let Err(e) = machine.record(&machine_dir, &salt_dir) {
        log.error(e);
        return ExitCode::from(1);
    }

    log.step(format!("machine is up ({})", machine_dir.display()));
    ExitCode::SUCCESS
}

pub fn up(log: &Log, cfg: &Config) -> ExitCode {
    with_machine(log, cfg, |m| m.up(log))
}

pub fn down(log: &Log, cfg: &Config) -> ExitCode {
    with_machine(log, cfg, |m| m.down(log))
}

pub fn ssh(log: &Log, cfg: &Config) -> ExitCode {
    with_machine(log, cfg, |m| m.ssh(log))
}

/// Re-provision from the latest salt states. Confirmation comes first: a
/// decline returns before any subprocess runs.
pub fn update(log: &Log, cfg: &Config, yes: bool) -> ExitCode {
    if !yes && !prompt::confirm("halt the machine and re-provision from the latest salt states") {
        log.info("aborted.");
        return ExitCode::SUCCESS;
    }

    with_machine(log, cfg, |m| m.reprovision(log))
}

fn with_machine(
    log: &Log,
    cfg: &Config,
    body: impl FnOnce(&Machine) -> Result<(), String>,
) -> ExitCode {
    let store = match Store::open_default() {
        Ok(s) => s,
        Err(e) => {
            log.error(e);
            return ExitCode::from(2);
        }
    };
    let machine = Machine::new(cfg, store);

    match body(&machine) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log.error(e);
            ExitCode::from(1)
        }
    }
}
