// Author Dustin Pilgrim
// License: MIT

use crate::paths::state_file_path;
use std::{fs, path::PathBuf};

/// All devm state lives under this one section. Other sections in the file
/// belong to other tools and must survive every rewrite untouched.
pub const SECTION: &str = "vagrant";

/// Section-scoped key/value store over an INI-style text file.
///
/// Keys written by devm: `vagrantfile` (directory holding the rendered
/// Vagrantfile), `box` (registered box name), `salt` (states clone path).
#[derive(Debug, Clone)]
pub struct Store {
    path: PathBuf,
}

impl Store {
    pub fn open_default() -> Result<Self, String> {
        Ok(Self {
            path: state_file_path()?,
        })
    }

    pub fn at(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }

    /// Value for `key` in the devm section. Missing file, missing section and
    /// unset key all come back as `None`, never as an error. If the key occurs
    /// more than once, the last occurrence wins.
    pub fn get(&self, key: &str) -> Result<Option<String>, String> {
        if !self.path.exists() {
            return Ok(None);
        }

        let text = fs::read_to_string(&self.path)
            .map_err(|e| format!("failed to read {}: {e}", self.path.display()))?;

        let mut in_section = false;
        let mut found = None;

        for line in text.lines() {
            if let Some(name) = section_header(line) {
                in_section = name == SECTION;
                continue;
            }
            if !in_section {
                continue;
            }
            if let Some((k, v)) = key_value(line) {
                if k == key {
                    found = Some(v.to_string());
                }
            }
        }

        Ok(found)
    }

    /// Set `key = value` in the devm section, creating the section if absent,
    /// and rewrite the file. Every line outside the section is written back
    /// verbatim, comments included.
    pub fn set(&self, key: &str, value: &str) -> Result<(), String> {
        let text = if self.path.exists() {
            fs::read_to_string(&self.path)
                .map_err(|e| format!("failed to read {}: {e}", self.path.display()))?
        } else {
            String::new()
        };

        let mut lines: Vec<String> = text.lines().map(str::to_string).collect();

        let mut in_section = false;
        let mut section_found = false;
        let mut insert_at = None;
        let mut replaced = false;

        for i in 0..lines.len() {
            if let Some(name) = section_header(&lines[i]) {
                if in_section {
                    // Left our section without finding the key.
                    break;
                }
                in_section = name == SECTION;
                if in_section {
                    section_found = true;
                    insert_at = Some(i + 1);
                }
                continue;
            }
            if !in_section {
                continue;
            }
            if let Some((k, _)) = key_value(&lines[i]) {
                if k == key {
                    lines[i] = format!("{key} = {value}");
                    replaced = true;
                    break;
                }
                insert_at = Some(i + 1);
            }
        }

        if !replaced {
            match insert_at {
                Some(i) if section_found => {
                    lines.insert(i, format!("{key} = {value}"));
                }
                _ => {
                    if !lines.is_empty() && !lines.last().is_some_and(|l| l.trim().is_empty()) {
                        lines.push(String::new());
                    }
                    lines.push(format!("[{SECTION}]"));
                    lines.push(format!("{key} = {value}"));
                }
            }
        }

        let mut out = lines.join("\n");
        out.push('\n');

        fs::write(&self.path, out)
            .map_err(|e| format!("failed to write {}: {e}", self.path.display()))?;
        Ok(())
    }
}

fn section_header(line: &str) -> Option<&str> {
    let t = line.trim();
    if t.len() >= 2 && t.starts_with('[') && t.ends_with(']') {
        Some(t[1..t.len() - 1].trim())
    } else {
        None
    }
}

fn key_value(line: &str) -> Option<(&str, &str)> {
    let t = line.trim();
    if t.is_empty() || t.starts_with('#') || t.starts_with(';') {
        return None;
    }
    let (k, v) = t.split_once('=')?;
    Some((k.trim(), v.trim()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_in(dir: &tempfile::TempDir) -> Store {
        Store::at(dir.path().join("state.ini"))
    }

    #[test]
    fn set_then_get_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        store.set("vagrantfile", "/home/u/dev/vagrant").unwrap();
        assert_eq!(
            store.get("vagrantfile").unwrap().as_deref(),
            Some("/home/u/dev/vagrant")
        );
    }

    #[test]
    fn get_without_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        assert_eq!(store.get("box").unwrap(), None);
    }

    #[test]
    fn get_unset_key_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        store.set("box", "devm-box").unwrap();
        assert_eq!(store.get("salt").unwrap(), None);
    }

    #[test]
    fn get_without_section_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.ini");
        fs::write(&path, "[other]\nkey = 1\n").unwrap();

        let store = Store::at(path);
        assert_eq!(store.get("key").unwrap(), None);
    }

    #[test]
    fn second_set_wins() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        store.set("box", "old-box").unwrap();
        store.set("box", "new-box").unwrap();
        assert_eq!(store.get("box").unwrap().as_deref(), Some("new-box"));
    }

    #[test]
    fn foreign_sections_survive_set() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.ini");
        fs::write(
            &path,
            "# managed elsewhere\n[other]\ntoken = abc\n\n[vagrant]\nbox = devm-box\n",
        )
        .unwrap();

        let store = Store::at(path.clone());
        store.set("salt", "/home/u/.config/devm/salt").unwrap();
        store.set("box", "devm-box-2").unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert!(text.contains("# managed elsewhere"));
        assert!(text.contains("[other]"));
        assert!(text.contains("token = abc"));
        assert_eq!(store.get("box").unwrap().as_deref(), Some("devm-box-2"));
        assert_eq!(
            store.get("salt").unwrap().as_deref(),
            Some("/home/u/.config/devm/salt")
        );
    }

    #[test]
    fn foreign_section_after_ours_is_not_swallowed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.ini");
        fs::write(&path, "[vagrant]\nbox = devm-box\n[zz]\nk = v\n").unwrap();

        let store = Store::at(path.clone());
        store.set("salt", "/tmp/salt").unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert!(text.contains("[zz]"));
        assert!(text.contains("k = v"));
        // The new key landed in our section, not in [zz].
        let vagrant_part = text.split("[zz]").next().unwrap();
        assert!(vagrant_part.contains("salt = /tmp/salt"));
    }

    #[test]
    fn duplicate_keys_last_wins_on_get() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.ini");
        fs::write(&path, "[vagrant]\nbox = first\nbox = second\n").unwrap();

        let store = Store::at(path);
        assert_eq!(store.get("box").unwrap().as_deref(), Some("second"));
    }
}
