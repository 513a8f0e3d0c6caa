use super::load::{default_config_path, default_state_path, resolve_config_path};
use super::schema::*;
use std::path::PathBuf;
use std::sync::{Mutex, OnceLock};

static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

fn env_lock() -> std::sync::MutexGuard<'static, ()> {
    ENV_LOCK
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|e| e.into_inner())
}

struct EnvGuard {
    key: &'static str,
    old: Option<std::ffi::OsString>,
}

impl EnvGuard {
    fn set(key: &'static str, val: &str) -> Self {
        let old = std::env::var_os(key);
        unsafe {
            std::env::set_var(key, val);
        }
        Self { key, old }
    }

    fn remove(key: &'static str) -> Self {
        let old = std::env::var_os(key);
        unsafe {
            std::env::remove_var(key);
        }
        Self { key, old }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        match self.old.take() {
            Some(v) => unsafe {
                std::env::set_var(self.key, v);
            },
            None => unsafe {
                std::env::remove_var(self.key);
            },
        }
    }
}

#[test]
fn resolve_config_path_prefers_explicit_env() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("AUDIOSHELF_CONFIG_PATH", "/tmp/audioshelf-test-config.toml");
    assert_eq!(
        resolve_config_path().unwrap(),
        PathBuf::from("/tmp/audioshelf-test-config.toml")
    );
}

#[test]
fn default_config_path_prefers_xdg_config_home() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("XDG_CONFIG_HOME", "/tmp/xdg-config-home");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-should-not-win");

    assert_eq!(
        default_config_path().unwrap(),
        PathBuf::from("/tmp/xdg-config-home")
            .join("audioshelf")
            .join("config.toml")
    );
}

#[test]
fn default_config_path_falls_back_to_home_dot_config() {
    let _lock = env_lock();
    let _g1 = EnvGuard::remove("XDG_CONFIG_HOME");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-dir");

    assert_eq!(
        default_config_path().unwrap(),
        PathBuf::from("/tmp/home-dir")
            .join(".config")
            .join("audioshelf")
            .join("config.toml")
    );
}

#[test]
fn default_state_path_uses_xdg_data_home_then_local_share() {
    let _lock = env_lock();
    {
        let _g1 = EnvGuard::set("XDG_DATA_HOME", "/tmp/xdg-data");
        assert_eq!(
            default_state_path().unwrap(),
            PathBuf::from("/tmp/xdg-data/audioshelf/library.toml")
        );
    }
    let _g1 = EnvGuard::remove("XDG_DATA_HOME");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-dir");
    assert_eq!(
        default_state_path().unwrap(),
        PathBuf::from("/tmp/home-dir/.local/share/audioshelf/library.toml")
    );
}

#[test]
fn explicit_state_path_wins_over_default() {
    let mut s = Settings::default();
    s.library.state_path = Some(PathBuf::from("/srv/shelf.toml"));
    assert_eq!(s.state_path().unwrap(), PathBuf::from("/srv/shelf.toml"));
}

#[test]
fn validate_rejects_zero_workers() {
    let mut s = Settings::default();
    assert!(s.validate().is_ok());
    s.resolver.workers = 0;
    assert!(s.validate().is_err());
}

#[test]
fn settings_load_from_config_file() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[library]
case_insensitive_extensions = true
follow_links = true
include_hidden = false
max_listing = 50
state_path = "/tmp/shelf-state.toml"

[resolver]
workers = 2

[logging]
level = "debug"
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("AUDIOSHELF_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::remove("AUDIOSHELF__RESOLVER__WORKERS");

    let s = Settings::load().unwrap();
    assert!(s.library.case_insensitive_extensions);
    assert!(s.library.follow_links);
    assert!(!s.library.include_hidden);
    assert_eq!(s.library.max_listing, 50);
    assert_eq!(
        s.library.state_path,
        Some(PathBuf::from("/tmp/shelf-state.toml"))
    );
    assert_eq!(s.resolver.workers, 2);
    assert_eq!(s.logging.level, "debug");
}

#[test]
fn settings_env_overrides_config_file() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[resolver]
workers = 8
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("AUDIOSHELF_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::set("AUDIOSHELF__RESOLVER__WORKERS", "1");

    let s = Settings::load().unwrap();
    assert_eq!(s.resolver.workers, 1);
}

#[test]
fn missing_config_file_yields_defaults() {
    let _lock = env_lock();
    let dir = tempfile::tempdir().unwrap();
    let _g1 = EnvGuard::set(
        "AUDIOSHELF_CONFIG_PATH",
        dir.path().join("absent.toml").to_str().unwrap(),
    );
    let _g2 = EnvGuard::remove("AUDIOSHELF__RESOLVER__WORKERS");

    let s = Settings::load().unwrap();
    assert_eq!(s.resolver.workers, 4);
    assert!(!s.library.case_insensitive_extensions);
    assert_eq!(s.library.max_listing, 2000);
}
