// Author Dustin Pilgrim
// License: MIT

use crate::paths::user_config_path;
use rune_cfg::RuneConfig;
use std::{
    fs,
    io::{self, IsTerminal, Write},
    path::{Path, PathBuf},
};

pub const DEFAULT_VAGRANT_BIN: &str = "/usr/bin/vagrant";
pub const DEFAULT_BOX_NAME: &str = "devm-box";
pub const DEFAULT_SALT_REPO: &str = "https://github.com/devm-ops/salt-states.git";

#[derive(Debug, Clone)]
pub struct Config {
    /// Path to the vagrant executable.
    pub vagrant_bin: PathBuf,

    /// Name the box image is registered under (`vagrant box add <name> ...`).
    pub box_name: String,

    /// Remote git URL of the salt states repository.
    pub salt_repo: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            vagrant_bin: PathBuf::from(DEFAULT_VAGRANT_BIN),
            box_name: DEFAULT_BOX_NAME.to_string(),
            salt_repo: DEFAULT_SALT_REPO.to_string(),
        }
    }
}

impl Config {
    /// Bootstrap behavior:
    /// - If config doesn't exist, ask ONCE (interactive) whether to create a default config at:
    ///     $HOME/.config/devm/devm.rune
    /// - If user says no, devm creates a sentinel so it won't ask again.
    ///
    /// NOTE: This uses stdin/stdout; keep it early in program startup.
    pub fn load_or_bootstrap_interactive() -> Result<Option<Self>, String> {
        let path = user_config_path()?;
        if path.exists() {
            return Self::from_file(&path).map(Some);
        }

        // Only prompt if stdin+stdout are terminals.
        if !io::stdin().is_terminal() || !io::stdout().is_terminal() {
            return Ok(None);
        }

        // Ask-once sentinel (if user previously said "no", do not prompt again).
        let sentinel = bootstrap_sentinel_path(&path)?;
        if sentinel.exists() {
            return Ok(None);
        }

        println!(
            "devm: no config found.\n\
             Create default config at {} ?\n\
             (Without one, devm uses the built-in vagrant path, box name and salt repo.)",
            path.display()
        );
        print!("Create config? [Y/n] ");
        let _ = io::stdout().flush();

        let mut s = String::new();
        let ok = io::stdin().read_line(&mut s).is_ok();
        let t = s.trim().to_ascii_lowercase();

        // If stdin read failed, do not create anything.
        if !ok {
            return Ok(None);
        }

        let yes = t.is_empty() || matches!(t.as_str(), "y" | "yes");
        if !yes {
            // Mark that we asked already so we don't nag on every run.
            write_bootstrap_sentinel(&sentinel)?;
            return Ok(None);
        }

        self::write_default_config(&path)?;
        Self::from_file(&path).map(Some)
    }

    fn from_file(path: &Path) -> Result<Self, String> {
        let cfg = RuneConfig::from_file(path.to_str().ok_or("invalid config path")?)
            .map_err(|e| format!("failed to parse config {}: {e}", path.display()))?;

        // vagrant.bin (default /usr/bin/vagrant)
        let vagrant_bin_s: String = cfg
            .get("vagrant.bin")
            .unwrap_or_else(|_| DEFAULT_VAGRANT_BIN.into());
        let vagrant_bin = {
            let p = vagrant_bin_s.trim();
            if p.is_empty() {
                PathBuf::from(DEFAULT_VAGRANT_BIN)
            } else {
                PathBuf::from(p)
            }
        };

        // vagrant.box_name (default devm-box)
        let box_name: String = cfg
            .get("vagrant.box_name")
            .unwrap_or_else(|_| DEFAULT_BOX_NAME.into());

        // salt.repo (default built-in states repo)
        let salt_repo: String = cfg
            .get("salt.repo")
            .unwrap_or_else(|_| DEFAULT_SALT_REPO.into());

        Ok(Self {
            vagrant_bin,
            box_name,
            salt_repo,
        })
    }
}

fn bootstrap_sentinel_path(config_path: &Path) -> Result<PathBuf, String> {
    let dir = config_path
        .parent()
        .ok_or_else(|| format!("invalid config path: {}", config_path.display()))?;
    Ok(dir.join(".devm_bootstrap_asked"))
}

fn write_bootstrap_sentinel(path: &Path) -> Result<(), String> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)
            .map_err(|e| format!("failed to create config dir {}: {e}", dir.display()))?;
    }
    fs::write(path, b"asked\n")
        .map_err(|e| format!("failed to write sentinel {}: {e}", path.display()))?;
    Ok(())
}

fn write_default_config(path: &Path) -> Result<(), String> {
    let dir = path
        .parent()
        .ok_or_else(|| format!("invalid config path: {}", path.display()))?;

    fs::create_dir_all(dir)
        .map_err(|e| format!("failed to create config dir {}: {e}", dir.display()))?;

    let default = default_config_text();

    fs::write(path, default)
        .map_err(|e| format!("failed to write config {}: {e}", path.display()))?;

    println!("devm: wrote default config: {}", path.display());
    Ok(())
}

fn default_config_text() -> String {
    // Keep this aligned with the built-in defaults above.
    r#"@author "devm"
@description "Dev machine front door config (vagrant + salt)"

vagrant:
  bin "/usr/bin/vagrant"
  box_name "devm-box"
end

salt:
  # States repository cloned under the devm config directory on `devm init`.
  repo "https://github.com/devm-ops/salt-states.git"
end
"#
    .to_string()
}
