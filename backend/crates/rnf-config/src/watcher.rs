use crate::{Config, ConfigError, ConfigErrorResult, HostEnvironment};

use log::{debug, info, warn};
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};

/// Watches the content root and reloads the configuration when a settings file changes.
///
/// Reloads that fail to parse or validate are logged and dropped; the
/// previous configuration stays in effect. Dropping the watcher stops it.
pub struct ConfigWatcher {
    _watcher: RecommendedWatcher,
}

impl ConfigWatcher {
    pub fn start<F>(environment: HostEnvironment, on_reload: F) -> ConfigErrorResult<Self>
    where
        F: Fn(Config) + Send + 'static,
    {
        let watched_environment = environment.clone();

        let mut watcher = notify::recommended_watcher(move |res: notify::Result<Event>| {
            let event = match res {
                Ok(event) => event,
                Err(e) => {
                    warn!("Configuration watcher error: {e}");
                    return;
                }
            };

            if !Self::should_reload(&watched_environment, &event) {
                return;
            }

            debug!("Settings change detected: {:?}", event.paths);
            let reloaded = Config::load(&watched_environment)
                .and_then(|config| config.validate().map(|()| config));

            match reloaded {
                Ok(config) => {
                    info!("Configuration reloaded");
                    on_reload(config);
                }
                Err(e) => warn!("Configuration reload failed, keeping previous settings: {e}"),
            }
        })
        .map_err(|e| ConfigError::Watch {
            path: environment.content_root.clone(),
            source: e,
        })?;

        watcher
            .watch(&environment.content_root, RecursiveMode::NonRecursive)
            .map_err(|e| ConfigError::Watch {
                path: environment.content_root.clone(),
                source: e,
            })?;

        info!(
            "Watching {} for settings changes",
            environment.content_root.display()
        );

        Ok(Self { _watcher: watcher })
    }

    /// Only writes and creations of this environment's settings files trigger a reload.
    pub fn should_reload(environment: &HostEnvironment, event: &Event) -> bool {
        matches!(event.kind, EventKind::Modify(_) | EventKind::Create(_))
            && event
                .paths
                .iter()
                .any(|path| environment.is_settings_file(path))
    }
}
