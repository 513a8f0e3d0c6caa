use std::path::PathBuf;

use serde::Deserialize;

/// Top-level settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/audioshelf/config.toml` or `~/.config/audioshelf/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `AUDIOSHELF__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub library: LibrarySettings,
    pub resolver: ResolverSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LibrarySettings {
    /// Match `.MP3`, `.Wav`, ... as well as the lowercase extensions.
    pub case_insensitive_extensions: bool,
    /// Whether to follow symlinks while walking a new root.
    pub follow_links: bool,
    /// Whether to include hidden files/directories (dotfiles).
    pub include_hidden: bool,
    /// Directories with more files than this are not listed.
    pub max_listing: usize,
    /// Where the library state is kept. Defaults to the XDG data directory.
    pub state_path: Option<PathBuf>,
}

impl Default for LibrarySettings {
    fn default() -> Self {
        Self {
            case_insensitive_extensions: false,
            follow_links: false,
            include_hidden: true,
            max_listing: 2000,
            state_path: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ResolverSettings {
    /// Number of threads probing durations.
    pub workers: usize,
}

impl Default for ResolverSettings {
    fn default() -> Self {
        Self { workers: 4 }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Default filter directive, overridden by `AUDIOSHELF_LOG`.
    pub level: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}
