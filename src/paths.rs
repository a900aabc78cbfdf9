// Author Dustin Pilgrim
// License: MIT

use std::path::PathBuf;

/// Per-machine state written after a successful `devm init`.
pub fn state_file_path() -> Result<PathBuf, String> {
    let home = dirs::home_dir().ok_or("could not locate home dir")?;
    Ok(home.join(".devm.ini"))
}

pub fn config_dir() -> Result<PathBuf, String> {
    let base = dirs::config_dir().ok_or("could not locate config dir")?;
    Ok(base.join("devm"))
}

pub fn user_config_path() -> Result<PathBuf, String> {
    Ok(config_dir()?.join("devm.rune"))
}

/// Local clone of the salt states repository.
pub fn salt_repo_path() -> Result<PathBuf, String> {
    Ok(config_dir()?.join("salt"))
}
