//! Shared test utilities for integration tests
//!
//! Serializes access to process environment variables so tests that point
//! `XDG_CONFIG_HOME` / `DROPIN_*` at scratch locations do not race.

use std::path::Path;
use std::sync::Mutex;
use tempfile::TempDir;

/// Global mutex to serialize environment variable access across all tests
static ENV_MUTEX: Mutex<()> = Mutex::new(());

/// Environment variable state to restore after test
struct EnvState {
    vars: Vec<(String, Option<String>)>,
}

impl EnvState {
    fn capture(keys: &[&str]) -> Self {
        Self {
            vars: keys
                .iter()
                .map(|k| (k.to_string(), std::env::var(k).ok()))
                .collect(),
        }
    }

    fn restore(self) {
        for (key, value) in self.vars {
            match value {
                Some(orig) => std::env::set_var(&key, orig),
                None => std::env::remove_var(&key),
            }
        }
    }
}

/// Run `f` with `XDG_CONFIG_HOME` pointing into `test_dir` and the given
/// extra variables set, restoring the environment afterwards.
pub fn with_config_env<F, R>(test_dir: &TempDir, vars: &[(&str, &str)], f: F) -> R
where
    F: FnOnce(&Path) -> R,
{
    let _guard = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());

    let mut keys: Vec<&str> = vars.iter().map(|(k, _)| *k).collect();
    keys.push("XDG_CONFIG_HOME");
    let env_state = EnvState::capture(&keys);

    let config_home = test_dir.path().join("config");
    std::fs::create_dir_all(config_home.join("dropin")).unwrap();

    std::env::set_var("XDG_CONFIG_HOME", &config_home);
    for (key, value) in vars {
        std::env::set_var(key, value);
    }

    let result = f(&config_home);

    env_state.restore();

    result
}

/// Names of the files in `paths`, in order.
pub fn file_names(paths: &[std::path::PathBuf]) -> Vec<String> {
    paths
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
        .collect()
}
