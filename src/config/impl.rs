use std::sync::{Arc, OnceLock};

use arc_swap::ArcSwap;

use super::StaticConfig;
use crate::errors::Result;

static CONFIG: OnceLock<ArcSwap<StaticConfig>> = OnceLock::new();

/// Get the global configuration instance
///
/// Returns an Arc pointer to the configuration, which is cheap to clone
/// and doesn't hold any locks. Falls back to defaults if `init_config`
/// was never called.
pub fn get_config() -> Arc<StaticConfig> {
    CONFIG
        .get_or_init(|| ArcSwap::from_pointee(StaticConfig::default()))
        .load_full()
}

/// Initialize the global configuration
///
/// Loads configuration from `path` (or "config.toml" in the current
/// directory). If the file doesn't exist, environment variables and
/// in-memory defaults are used. Calling it again replaces the previous
/// configuration.
pub fn init_config(path: Option<&str>) -> Result<Arc<StaticConfig>> {
    let loaded = Arc::new(StaticConfig::load(path)?);
    match CONFIG.get() {
        Some(current) => current.store(Arc::clone(&loaded)),
        None => {
            let _ = CONFIG.set(ArcSwap::new(Arc::clone(&loaded)));
        }
    }
    Ok(get_config())
}
