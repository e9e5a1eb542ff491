//! Settings management

use plinth_core::WorldConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings from {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed settings")]
    Parse(#[from] serde_json::Error),

    #[error("invalid setting `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// Runtime settings. Every field has a default, so a settings file only
/// needs the values it overrides.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub world: WorldConfig,
    pub demo: DemoSettings,
}

/// Parameters of the headless bouncing-ball demo.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoSettings {
    /// Frames to simulate before exiting.
    pub frames: u32,
    /// Fixed timestep handed to every update, in seconds.
    pub delta_time: f32,
    pub arena_width: u32,
    pub arena_height: u32,
    pub ball_count: u32,
    pub seed: u64,
    /// Print the canvas every this many frames; 0 disables drawing output.
    pub draw_every: u32,
}

impl Default for DemoSettings {
    fn default() -> Self {
        Self {
            frames: 120,
            delta_time: 1.0 / 60.0,
            arena_width: 64,
            arena_height: 24,
            ball_count: 8,
            seed: 42,
            draw_every: 30,
        }
    }
}

impl Settings {
    /// Read and validate settings from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = Self::from_json(&text)?;
        info!(path = %path.display(), "loaded settings");
        Ok(settings)
    }

    /// Parse and validate settings from a JSON string.
    pub fn from_json(text: &str) -> Result<Self, SettingsError> {
        let settings: Self = serde_json::from_str(text)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        let checks = [
            (self.world.max_entities == 0, "world.max_entities", "must be at least 1"),
            (
                self.world.max_component_types == 0,
                "world.max_component_types",
                "must be at least 1",
            ),
            (
                !self.demo.delta_time.is_finite() || self.demo.delta_time < 0.0,
                "demo.delta_time",
                "must be a non-negative number",
            ),
            (
                self.demo.arena_width < 2 || self.demo.arena_height < 2,
                "demo.arena_width/arena_height",
                "arena must be at least 2x2",
            ),
            (
                self.demo.ball_count as usize > self.world.max_entities,
                "demo.ball_count",
                "exceeds world.max_entities",
            ),
        ];

        match checks.into_iter().find(|(failed, _, _)| *failed) {
            Some((_, field, reason)) => Err(SettingsError::Invalid { field, reason }),
            None => Ok(()),
        }
    }
}
