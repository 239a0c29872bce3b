use crate::config::Settings;

/// Settings are optional: a missing, unreadable or invalid file falls back to
/// defaults. Logging is not up yet, so problems go to stderr.
pub fn load_settings() -> Settings {
    let loaded = Settings::load().map_err(|e| format!("failed to load config: {e}"));
    match loaded.and_then(|s| s.validate().map(|()| s).map_err(|m| format!("invalid config: {m}"))) {
        Ok(s) => s,
        Err(msg) => {
            eprintln!("encore: {msg}, using defaults");
            Settings::default()
        }
    }
}
