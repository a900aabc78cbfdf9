// Author Dustin Pilgrim
// License: MIT

use crate::{config::Config, core::salt, core::store::Store, log::Log};
use std::{
    fs,
    path::{Path, PathBuf},
};

mod invoke;
mod template;
mod workdir;

use invoke::{args, require_success, vagrant};
use workdir::Workdir;

/// One local dev machine, driven through the vagrant executable. Construction
/// takes the resolved config; nothing in here reads globals.
pub struct Machine<'a> {
    cfg: &'a Config,
    store: Store,
}

impl<'a> Machine<'a> {
    pub fn new(cfg: &'a Config, store: Store) -> Self {
        Self { cfg, store }
    }

    /// Render the Vagrantfile into `<workdir>/vagrant/` and return the
    /// directory holding it. Re-running overwrites the rendered file only.
    pub fn write_descriptor(
        &self,
        log: &Log,
        workdir: &Path,
        salt_dir: &Path,
    ) -> Result<PathBuf, String> {
        let dir = workdir.join("vagrant");
        log.step(format!("creating vagrant folder {}", dir.display()));
        if !dir.exists() {
            fs::create_dir(&dir)
                .map_err(|e| format!("failed to create {}: {e}", dir.display()))?;
        }

        let roots = salt_dir.join("roots");
        let minion = salt_dir.join("minion");
        let rendered = template::render(
            &self.cfg.box_name,
            path_str(workdir)?,
            path_str(&roots)?,
            path_str(&minion)?,
        );

        let file = dir.join("Vagrantfile");
        fs::write(&file, rendered)
            .map_err(|e| format!("failed to write {}: {e}", file.display()))?;
        Ok(dir)
    }

    /// Register the box image and bring the machine up for the first time,
    /// provisioning included. Runs inside the machine directory.
    pub fn boot(&self, log: &Log, image: &Path, machine_dir: &Path) -> Result<(), String> {
        let _cwd = Workdir::enter(machine_dir)?;

        log.step(format!("registering box {}", self.cfg.box_name));
        let mut add = args(&["box", "add", &self.cfg.box_name]);
        add.push(image.as_os_str().to_os_string());
        add.push("--force".into());
        require_success(
            vagrant(log, &self.cfg.vagrant_bin, add)?,
            "vagrant box add",
        )?;

        log.step("bringing the machine up");
        require_success(
            vagrant(log, &self.cfg.vagrant_bin, args(&["up", "--provision"]))?,
            "vagrant up",
        )
    }

    /// Persist where the machine lives so later commands can find it.
    pub fn record(&self, machine_dir: &Path, salt_dir: &Path) -> Result<(), String> {
        self.store.set("vagrantfile", path_str(machine_dir)?)?;
        self.store.set("box", &self.cfg.box_name)?;
        self.store.set("salt", path_str(salt_dir)?)
    }

    pub fn up(&self, log: &Log) -> Result<(), String> {
        let dir = self.machine_dir()?;
        let _cwd = Workdir::enter(&dir)?;
        require_success(
            vagrant(log, &self.cfg.vagrant_bin, args(&["up"]))?,
            "vagrant up",
        )
    }

    pub fn down(&self, log: &Log) -> Result<(), String> {
        let dir = self.machine_dir()?;
        let _cwd = Workdir::enter(&dir)?;
        require_success(
            vagrant(log, &self.cfg.vagrant_bin, args(&["halt"]))?,
            "vagrant halt",
        )
    }

    /// Interactive shell. The session's exit status is the user's business,
    /// not ours, so a non-zero exit is ignored.
    pub fn ssh(&self, log: &Log) -> Result<(), String> {
        let dir = self.machine_dir()?;
        let _cwd = Workdir::enter(&dir)?;
        let _ = vagrant(log, &self.cfg.vagrant_bin, args(&["ssh"]))?;
        Ok(())
    }

    /// Halt, pull the latest salt states, come back up with provisioning.
    pub fn reprovision(&self, log: &Log) -> Result<(), String> {
        let dir = self.machine_dir()?;
        let salt_dir = self.salt_dir()?;
        let _cwd = Workdir::enter(&dir)?;

        log.step("halting the machine");
        require_success(
            vagrant(log, &self.cfg.vagrant_bin, args(&["halt"]))?,
            "vagrant halt",
        )?;

        log.step("pulling salt states");
        salt::pull(log, &salt_dir)?;

        log.step("starting with re-provision");
        require_success(
            vagrant(log, &self.cfg.vagrant_bin, args(&["up", "--provision"]))?,
            "vagrant up",
        )
    }

    /// Directory holding the rendered Vagrantfile, as recorded by `init`.
    pub fn machine_dir(&self) -> Result<PathBuf, String> {
        match self.store.get("vagrantfile")? {
            Some(dir) => Ok(PathBuf::from(dir)),
            None => Err(format!(
                "no machine recorded in {} (run `devm init <image> <workdir>` first)",
                self.store.path().display()
            )),
        }
    }

    fn salt_dir(&self) -> Result<PathBuf, String> {
        match self.store.get("salt")? {
            Some(dir) => Ok(PathBuf::from(dir)),
            None => crate::paths::salt_repo_path(),
        }
    }
}

fn path_str(p: &Path) -> Result<&str, String> {
    p.to_str()
        .ok_or_else(|| format!("path is not valid UTF-8: {}", p.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> Config {
        Config::default()
    }

    #[test]
    fn write_descriptor_renders_into_vagrant_subdir() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::at(dir.path().join("state.ini"));
        let cfg = test_config();
        let machine = Machine::new(&cfg, store);
        let log = Log {
            quiet: true,
            verbose: false,
        };

        let workdir = dir.path().join("work");
        fs::create_dir(&workdir).unwrap();
        let salt = dir.path().join("salt");

        let out = machine.write_descriptor(&log, &workdir, &salt).unwrap();
        assert_eq!(out, workdir.join("vagrant"));

        let rendered = fs::read_to_string(out.join("Vagrantfile")).unwrap();
        assert!(rendered.contains(&cfg.box_name));
        assert!(rendered.contains(workdir.to_str().unwrap()));
        assert!(rendered.contains(salt.join("roots").to_str().unwrap()));
        assert!(rendered.contains(salt.join("minion").to_str().unwrap()));
    }

    #[test]
    fn record_then_machine_dir_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::at(dir.path().join("state.ini"));
        let cfg = test_config();
        let machine = Machine::new(&cfg, store);

        let machine_dir = dir.path().join("work").join("vagrant");
        let salt = dir.path().join("salt");
        machine.record(&machine_dir, &salt).unwrap();

        assert_eq!(machine.machine_dir().unwrap(), machine_dir);
        assert_eq!(machine.salt_dir().unwrap(), salt);
    }

    #[test]
    fn machine_dir_before_init_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::at(dir.path().join("state.ini"));
        let cfg = test_config();
        let machine = Machine::new(&cfg, store);

        let err = machine.machine_dir().unwrap_err();
        assert!(err.contains("devm init"));
    }
}
