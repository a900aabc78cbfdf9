// Author Dustin Pilgrim
// License: MIT

use std::{
    env,
    path::{Path, PathBuf},
};

/// Scoped working-directory switch. `enter` records the current directory and
/// chdirs into `dir`; dropping the guard restores the original directory, on
/// error paths included. The process cwd is global state, so at most one
/// guard is alive at a time.
pub struct Workdir {
    saved: PathBuf,
}

impl Workdir {
    pub fn enter(dir: &Path) -> Result<Self, String> {
        let saved = env::current_dir()
            .map_err(|e| format!("failed to read current directory: {e}"))?;
        env::set_current_dir(dir)
            .map_err(|e| format!("failed to enter {}: {e}", dir.display()))?;
        Ok(Self { saved })
    }
}

impl Drop for Workdir {
    fn drop(&mut self) {
        let _ = env::set_current_dir(&self.saved);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // The process cwd is shared across the test harness's threads; every test
    // that touches it takes this lock.
    static CWD_LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn restores_on_scope_exit() {
        let _lock = CWD_LOCK.lock().unwrap();
        let dir = tempfile::tempdir().unwrap();
        let before = env::current_dir().unwrap();

        {
            let _cwd = Workdir::enter(dir.path()).unwrap();
            assert_eq!(
                env::current_dir().unwrap().canonicalize().unwrap(),
                dir.path().canonicalize().unwrap()
            );
        }

        assert_eq!(env::current_dir().unwrap(), before);
    }

    #[test]
    fn restores_when_the_body_fails() {
        let _lock = CWD_LOCK.lock().unwrap();
        let dir = tempfile::tempdir().unwrap();
        let before = env::current_dir().unwrap();

        fn failing_op(dir: &Path) -> Result<(), String> {
            let _cwd = Workdir::enter(dir)?;
            Err("halt exited with status 1".to_string())
        }

        assert!(failing_op(dir.path()).is_err());
        assert_eq!(env::current_dir().unwrap(), before);
    }

    #[test]
    fn enter_missing_directory_is_an_error() {
        let _lock = CWD_LOCK.lock().unwrap();
        let dir = tempfile::tempdir().unwrap();
        let before = env::current_dir().unwrap();

        let missing = dir.path().join("nope");
        assert!(Workdir::enter(&missing).is_err());
        assert_eq!(env::current_dir().unwrap(), before);
    }
}
