use shared_types::AppConfig;
use std::sync::OnceLock;

static CONFIG: OnceLock<AppConfig> = OnceLock::new();

/// Path to the config file, relative to the working directory.
#[cfg(not(target_arch = "wasm32"))]
const CONFIG_PATH: &str = "config.toml";

/// Parse config text, falling back to defaults when it is malformed.
pub fn parse_config(contents: &str) -> AppConfig {
    toml::from_str(contents).unwrap_or_else(|e| {
        eprintln!("[config] Failed to parse config: {e}; using defaults");
        AppConfig::default()
    })
}

/// Read `config.toml` once and store it for the process lifetime.
/// Later calls return the first result.
///
/// Runs before the logger exists, so problems go to stderr.
///
/// Browsers have no filesystem, so web builds always use the defaults.
pub fn load() -> &'static AppConfig {
    CONFIG.get_or_init(read_config)
}

#[cfg(not(target_arch = "wasm32"))]
fn read_config() -> AppConfig {
    match std::fs::read_to_string(CONFIG_PATH) {
        Ok(contents) => parse_config(&contents),
        Err(e) => {
            eprintln!("[config] {CONFIG_PATH} not readable ({e}); using defaults");
            AppConfig::default()
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn read_config() -> AppConfig {
    AppConfig::default()
}

/// Map the configured level name to a `tracing` level, defaulting to INFO.
pub fn log_level(config: &AppConfig) -> tracing::Level {
    config
        .logging
        .level
        .parse()
        .unwrap_or(tracing::Level::INFO)
}
