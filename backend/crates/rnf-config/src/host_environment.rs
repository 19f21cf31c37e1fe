use crate::{
    BASE_SETTINGS_FILE, DEFAULT_ENVIRONMENT, DEVELOPMENT_ENVIRONMENT, SECRETS_DIRECTORY,
    SECRETS_FILE, SETTINGS_FILE_EXTENSION, SETTINGS_FILE_PREFIX,
};

use std::path::{Path, PathBuf};

/// Name of the running environment and the directory settings are read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostEnvironment {
    pub name: String,
    pub content_root: PathBuf,
}

impl HostEnvironment {
    pub fn new<S: Into<String>, P: Into<PathBuf>>(name: S, content_root: P) -> Self {
        Self {
            name: name.into(),
            content_root: content_root.into(),
        }
    }

    /// Priority: RNF_ENVIRONMENT / RNF_CONTENT_ROOT env vars > Production / cwd
    pub fn from_env() -> Self {
        let name =
            std::env::var("RNF_ENVIRONMENT").unwrap_or_else(|_| String::from(DEFAULT_ENVIRONMENT));
        let content_root = std::env::var("RNF_CONTENT_ROOT")
            .map(PathBuf::from)
            .or_else(|_| std::env::current_dir())
            .unwrap_or_else(|_| PathBuf::from("."));

        Self { name, content_root }
    }

    pub fn is_development(&self) -> bool {
        self.name.eq_ignore_ascii_case(DEVELOPMENT_ENVIRONMENT)
    }

    pub fn base_settings_path(&self) -> PathBuf {
        self.content_root.join(BASE_SETTINGS_FILE)
    }

    pub fn environment_settings_path(&self) -> PathBuf {
        self.content_root.join(format!(
            "{SETTINGS_FILE_PREFIX}.{}.{SETTINGS_FILE_EXTENSION}",
            self.name
        ))
    }

    /// Development-only secrets file.
    /// Priority: RNF_SECRETS_PATH env var > <user config dir>/rnf/secrets.toml
    pub fn secrets_path(&self) -> Option<PathBuf> {
        if let Ok(path) = std::env::var("RNF_SECRETS_PATH") {
            return Some(PathBuf::from(path));
        }

        dirs::config_dir().map(|dir| dir.join(SECRETS_DIRECTORY).join(SECRETS_FILE))
    }

    /// True for `appsettings.toml` and `appsettings.<Environment>.toml` of this environment.
    /// Only the file name is compared; watchers may report canonicalized paths.
    pub fn is_settings_file(&self, path: &Path) -> bool {
        let Some(file_name) = path.file_name() else {
            return false;
        };

        [self.base_settings_path(), self.environment_settings_path()]
            .iter()
            .any(|candidate| candidate.file_name() == Some(file_name))
    }
}
