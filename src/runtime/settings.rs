use crate::config;

/// Load settings, falling back to defaults. The problem (if any) is returned
/// so it can be logged once the subscriber is installed.
pub fn load_settings() -> (config::Settings, Option<String>) {
    match config::Settings::load() {
        Ok(s) => {
            if let Err(msg) = s.validate() {
                (
                    config::Settings::default(),
                    Some(format!("invalid config, using defaults: {msg}")),
                )
            } else {
                (s, None)
            }
        }
        // Config is optional; failures should not prevent the app from starting.
        Err(e) => (
            config::Settings::default(),
            Some(format!("failed to load config, using defaults: {e}")),
        ),
    }
}
