use std::{env, path::PathBuf};

use super::schema::Settings;

const APP_DIR: &str = "audioshelf";

/// Configuration loading helpers.
///
/// `Settings::load` reads an optional config file, then environment variables
/// (prefix `AUDIOSHELF__`), and falls back to struct defaults.
impl Settings {
    /// Load settings from environment and optional config file.
    pub fn load() -> Result<Self, ::config::ConfigError> {
        let config_path = resolve_config_path();

        let mut builder = ::config::Config::builder();

        if let Some(path) = &config_path {
            builder = builder.add_source(::config::File::from(path.as_path()).required(false));
        }

        builder = builder.add_source(
            ::config::Environment::with_prefix("AUDIOSHELF")
                .separator("__")
                .try_parsing(true),
        );

        let cfg = builder.build()?;
        let settings: Settings = cfg.try_deserialize()?;
        Ok(settings)
    }

    /// Perform basic validation checks on loaded settings.
    pub fn validate(&self) -> Result<(), String> {
        if self.resolver.workers == 0 {
            return Err("resolver.workers must be >= 1".to_string());
        }
        if self.library.max_listing == 0 {
            return Err("library.max_listing must be >= 1".to_string());
        }
        Ok(())
    }

    /// The state file location: explicit `library.state_path` wins over the
    /// XDG default.
    pub fn state_path(&self) -> Option<PathBuf> {
        self.library
            .state_path
            .clone()
            .or_else(default_state_path)
    }
}

/// Resolve the config path from `AUDIOSHELF_CONFIG_PATH` or XDG defaults.
pub fn resolve_config_path() -> Option<PathBuf> {
    if let Some(p) = env::var_os("AUDIOSHELF_CONFIG_PATH") {
        return Some(PathBuf::from(p));
    }
    default_config_path()
}

/// Compute the default config path under `$XDG_CONFIG_HOME/audioshelf/config.toml`
/// or `~/.config/audioshelf/config.toml` when `XDG_CONFIG_HOME` is not set.
pub fn default_config_path() -> Option<PathBuf> {
    let config_home = if let Some(xdg) = env::var_os("XDG_CONFIG_HOME") {
        Some(PathBuf::from(xdg))
    } else {
        env::var_os("HOME").map(|home| PathBuf::from(home).join(".config"))
    };

    config_home.map(|d| d.join(APP_DIR).join("config.toml"))
}

/// `$XDG_DATA_HOME/audioshelf/library.toml`, or `~/.local/share/audioshelf/library.toml`.
pub fn default_state_path() -> Option<PathBuf> {
    let data_home = if let Some(xdg) = env::var_os("XDG_DATA_HOME") {
        Some(PathBuf::from(xdg))
    } else {
        env::var_os("HOME").map(|home| PathBuf::from(home).join(".local").join("share"))
    };

    data_home.map(|d| d.join(APP_DIR).join("library.toml"))
}
