
use crate::HostEnvironment;

use std::env;

use tempfile::TempDir;

pub(crate) const TEST_CONNECTION: &str = "sqlite://test.db";

/// RAII guard for environment variables - automatically restores on drop
pub(crate) struct EnvGuard {
    key: &'static str,
    original: Option<String>,
}

impl EnvGuard {
    pub(crate) fn set(key: &'static str, value: &str) -> Self {
        unsafe {
            let original = env::var(key).ok();
            env::set_var(key, value);
            Self { key, original }
        }
    }

    pub(crate) fn remove(key: &'static str) -> Self {
        unsafe {
            let original = env::var(key).ok();
            env::remove_var(key);
            Self { key, original }
        }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        unsafe {
            match &self.original {
                Some(val) => env::set_var(self.key, val),
                None => env::remove_var(self.key),
            }
        }
    }
}

/// Create a temp content root for the named environment
pub(crate) fn setup_content_root(environment: &str) -> (TempDir, HostEnvironment) {
    let temp = TempDir::new().unwrap();
    let host = HostEnvironment::new(environment, temp.path());
    (temp, host)
}

/// Write a settings file into the content root
pub(crate) fn write_settings(temp: &TempDir, file_name: &str, contents: &str) {
    std::fs::write(temp.path().join(file_name), contents).unwrap();
}

/// Base settings with just a connection string, so validate() can pass
pub(crate) fn write_minimal_settings(temp: &TempDir) {
    write_settings(
        temp,
        "appsettings.toml",
        &format!("[connection_strings]\ndefault_connection = \"{TEST_CONNECTION}\"\n"),
    );
}
