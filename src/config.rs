//! Configuration for eventmap.
//!
//! Settings come from an optional TOML file; command-line flags and
//! environment variables override the endpoint and session directory.

use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::Deserialize;
use tracing::debug;

use crate::errors::EventMapError;
use crate::viewport::{EdgePadding, MapSize, Region};

/// Endpoint of the development event server.
pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:3333/events";

/// Top-level settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// URL the loader fetches the event list from
    pub endpoint: String,
    /// Directory holding the persisted session file
    pub session_dir: Option<PathBuf>,
    /// Static inputs to the map renderer
    pub map: MapSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            session_dir: None,
            map: MapSettings::default(),
        }
    }
}

impl Settings {
    /// Load settings from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self, EventMapError> {
        let content = fs::read_to_string(path)
            .map_err(|e| EventMapError::Config(format!("{}: {e}", path.display())))?;
        let settings: Self = toml::from_str(&content)?;
        debug!("loaded settings from {}", path.display());
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from `path` if given, defaults otherwise.
    ///
    /// # Errors
    ///
    /// Returns an error if a given file cannot be loaded.
    pub fn load(path: Option<&Path>) -> Result<Self, EventMapError> {
        match path {
            Some(p) => Self::from_file(p),
            None => Ok(Self::default()),
        }
    }

    /// Reject settings the renderer cannot work with.
    ///
    /// # Errors
    ///
    /// Returns a config error describing the first problem found.
    pub fn validate(&self) -> Result<(), EventMapError> {
        if self.endpoint.trim().is_empty() {
            return Err(EventMapError::Config("endpoint must not be empty".into()));
        }
        let size = self.map.size;
        if !(size.width > 0.0 && size.height > 0.0) {
            return Err(EventMapError::Config(format!(
                "map size must be positive, got {}x{}",
                size.width, size.height
            )));
        }
        let pad = self.map.edge_padding;
        if [pad.top, pad.right, pad.bottom, pad.left]
            .iter()
            .any(|v| *v < 0.0 || !v.is_finite())
        {
            return Err(EventMapError::Config("edge padding must be non-negative".into()));
        }
        Ok(())
    }

    /// Resolve the session directory, falling back to the platform data dir.
    ///
    /// # Errors
    ///
    /// Returns an error if no directory is configured and none can be derived.
    pub fn session_dir(&self) -> Result<PathBuf, EventMapError> {
        if let Some(dir) = &self.session_dir {
            return Ok(dir.clone());
        }
        ProjectDirs::from("org", "eventmap", "eventmap")
            .map(|dirs| dirs.data_dir().to_path_buf())
            .ok_or_else(|| EventMapError::Config("cannot determine a data directory".into()))
    }
}

/// Opaque renderer inputs: default region, padding, surface and assets.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MapSettings {
    pub default_region: Region,
    pub edge_padding: EdgePadding,
    pub size: MapSize,
    /// Named visual style handed to the map widget
    pub style: String,
    /// Marker image asset
    pub marker_icon: PathBuf,
}

impl Default for MapSettings {
    fn default() -> Self {
        Self {
            default_region: Region {
                latitude: -27.2092052,
                longitude: -49.6401092,
                latitude_delta: 0.008,
                longitude_delta: 0.008,
            },
            edge_padding: EdgePadding {
                top: 120.0,
                right: 24.0,
                bottom: 136.0,
                left: 24.0,
            },
            size: MapSize {
                width: 390.0,
                height: 844.0,
            },
            style: "custom".to_string(),
            marker_icon: PathBuf::from("images/map-marker.png"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let settings = Settings::default();
        settings.validate().unwrap();
        assert_eq!(settings.endpoint, DEFAULT_ENDPOINT);
    }

    #[test]
    fn test_missing_file_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");

        let err = Settings::load(Some(&path)).unwrap_err();

        assert!(matches!(err, EventMapError::Config(_)));
        assert!(err.to_string().contains("absent.toml"));
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let settings: Settings = toml::from_str(
            r#"
            endpoint = "http://10.0.0.5:3333/events"

            [map]
            style = "dark"

            [map.edge_padding]
            top = 10.0
            right = 10.0
            bottom = 10.0
            left = 10.0
            "#,
        )
        .unwrap();

        assert_eq!(settings.endpoint, "http://10.0.0.5:3333/events");
        assert_eq!(settings.map.style, "dark");
        assert!((settings.map.edge_padding.top - 10.0).abs() < f64::EPSILON);
        assert!((settings.map.size.width - 390.0).abs() < f64::EPSILON);
        settings.validate().unwrap();
    }

    #[test]
    fn test_negative_padding_rejected() {
        let mut settings = Settings::default();
        settings.map.edge_padding.left = -1.0;
        assert!(matches!(settings.validate(), Err(EventMapError::Config(_))));
    }

    #[test]
    fn test_explicit_session_dir_wins() {
        let settings = Settings {
            session_dir: Some(PathBuf::from("/tmp/eventmap-session")),
            ..Settings::default()
        };
        assert_eq!(
            settings.session_dir().unwrap(),
            PathBuf::from("/tmp/eventmap-session")
        );
    }
}
