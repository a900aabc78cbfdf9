// Author Dustin Pilgrim
// License: MIT

use crate::{cli::Cli, config::Config, core::store::Store, paths};
use std::process::ExitCode;

pub fn run_status(_log: &crate::log::Log, cli: &Cli, cfg: &Config) -> ExitCode {
    println!("status (v{})", env!("CARGO_PKG_VERSION"));

    // ------------------------------------------------------------
    // Config
    // ------------------------------------------------------------
    match paths::user_config_path() {
        Ok(p) => {
            if p.exists() {
                println!("config: loaded ({})", p.display());
            } else {
                println!("config: none (expected at {})", p.display());
            }
        }
        Err(e) => {
            eprintln!("error: failed to resolve config path: {e}");
            return ExitCode::from(2);
        }
    }

    println!(
        "vagrant: bin={} box={}",
        cfg.vagrant_bin.display(),
        cfg.box_name
    );

    // ------------------------------------------------------------
    // Salt states clone
    // ------------------------------------------------------------
    println!("salt repo: {}", cfg.salt_repo);
    match paths::salt_repo_path() {
        Ok(p) => {
            if p.exists() {
                println!("salt clone: {}", p.display());
            } else {
                println!("salt clone: none (created on `devm init`)");
            }
        }
        Err(e) => {
            eprintln!("error: failed to resolve salt path: {e}");
            return ExitCode::from(2);
        }
    }

    // ------------------------------------------------------------
    // Recorded machine state
    // ------------------------------------------------------------
    match Store::open_default() {
        Ok(store) => {
            println!("state file: {}", store.path().display());
            match machine_summary(&store) {
                Ok(Some((dir, box_name))) => {
                    println!("machine: {dir} (box {box_name})");
                }
                Ok(None) => {
                    println!("machine: none (run `devm init <image> <workdir>`)");
                }
                Err(e) => {
                    println!("machine: unavailable ({e})");
                }
            }
        }
        Err(e) => {
            println!("state file: unavailable ({e})");
        }
    }

    // ------------------------------------------------------------
    // Flags
    // ------------------------------------------------------------
    println!("flags: quiet={} verbose={}", cli.quiet, cli.verbose);

    ExitCode::SUCCESS
}

fn machine_summary(store: &Store) -> Result<Option<(String, String)>, String> {
    let Some(dir) = store.get("vagrantfile")? else {
        return Ok(None);
    };
    let box_name = store.get("box")?.unwrap_or_else(|| "<unset>".to_string());
    Ok(Some((dir, box_name)))
}
