//! Plinth Services Layer
//!
//! Host-side services the core stays free of. Currently settings loading.

pub mod settings;

pub use settings::{DemoSettings, Settings, SettingsError};

use std::path::Path;
use tracing::info;

/// Load settings from `path`, or fall back to defaults when none is given.
pub fn load_settings(path: Option<&Path>) -> Result<Settings, SettingsError> {
    match path {
        Some(path) => Settings::load(path),
        None => {
            info!("no settings file given, using defaults");
            Ok(Settings::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_path_means_defaults() {
        assert_eq!(load_settings(None).unwrap(), Settings::default());
    }
}
