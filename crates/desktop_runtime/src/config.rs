//! Typed runtime configuration loaded from TOML.
//!
//! Every field has a default, so an empty document (or no document at all) yields a working
//! desktop. Semantic checks run in [`DesktopConfig::validate`] after deserialization.

use std::{
    fs,
    path::{Path, PathBuf},
};

use platform_host::ListingMode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::WindowSize;

/// Configuration load and validation failures.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("failed to read {path}: {source}")]
    Read {
        /// Path that failed.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
    /// The document is not valid TOML for [`DesktopConfig`].
    #[error("failed to parse desktop config: {0}")]
    Parse(#[from] toml::de::Error),
    /// A value parsed but is out of range.
    #[error("invalid desktop config: {0}")]
    Invalid(String),
}

/// Window placement and sizing policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Width for windows opened without explicit geometry.
    pub default_width: i32,
    /// Height for windows opened without explicit geometry.
    pub default_height: i32,
    /// Minimum width enforced on resize.
    pub min_width: i32,
    /// Minimum height enforced on resize.
    pub min_height: i32,
    /// X origin of the cascade.
    pub cascade_origin_x: i32,
    /// Y origin of the cascade.
    pub cascade_origin_y: i32,
    /// Per-window cascade offset on both axes.
    pub cascade_step: i32,
    /// Number of cascade slots before wrapping back to the origin.
    pub cascade_wrap: u32,
    /// First z-index handed out.
    pub first_z_index: u64,
    /// Focus the next-topmost window when the focused one closes.
    pub refocus_on_close: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            default_width: 800,
            default_height: 600,
            min_width: 400,
            min_height: 300,
            cascade_origin_x: 100,
            cascade_origin_y: 100,
            cascade_step: 30,
            cascade_wrap: 10,
            first_z_index: 100,
            refocus_on_close: false,
        }
    }
}

impl WindowConfig {
    /// Default minimum size for new windows.
    pub fn min_size(&self) -> WindowSize {
        WindowSize {
            w: self.min_width,
            h: self.min_height,
        }
    }

    /// Default size for new windows.
    pub fn default_size(&self) -> WindowSize {
        WindowSize {
            w: self.default_width,
            h: self.default_height,
        }
    }
}

/// Desktop surface geometry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SurfaceConfig {
    /// Initial viewport width until the host reports one.
    pub viewport_width: i32,
    /// Initial viewport height until the host reports one.
    pub viewport_height: i32,
    /// Height reserved for the taskbar at the bottom of the viewport.
    pub taskbar_height: i32,
    /// Directory whose entries become desktop icons.
    pub desktop_dir: String,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            viewport_width: 1280,
            viewport_height: 800,
            taskbar_height: 48,
            desktop_dir: "/desktop/".to_string(),
        }
    }
}

impl SurfaceConfig {
    /// Initial viewport size.
    pub fn viewport(&self) -> WindowSize {
        WindowSize {
            w: self.viewport_width,
            h: self.viewport_height,
        }
    }
}

/// File store behaviour.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FsConfig {
    /// How `list` matches paths.
    pub listing: ListingMode,
    /// Write the default files on first boot.
    pub seed_defaults: bool,
}

impl Default for FsConfig {
    fn default() -> Self {
        Self {
            listing: ListingMode::Prefix,
            seed_defaults: true,
        }
    }
}

/// Layout persistence switches.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Save the window layout after every layout-changing action.
    pub persist_layout: bool,
    /// Restore the saved window layout at boot.
    pub restore_layout: bool,
}

/// Complete runtime configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DesktopConfig {
    /// `[window]` table.
    pub window: WindowConfig,
    /// `[desktop]` table.
    pub desktop: SurfaceConfig,
    /// `[fs]` table.
    pub fs: FsConfig,
    /// `[session]` table.
    pub session: SessionConfig,
}

impl DesktopConfig {
    /// Parses and validates a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed TOML and [`ConfigError::Invalid`] for
    /// out-of-range values.
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses, and validates a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Read`] when the file cannot be read, otherwise as
    /// [`Self::from_toml_str`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&raw)?;
        log::info!("loaded desktop config from {}", path.display());
        Ok(config)
    }

    /// Checks value ranges that serde cannot express.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("window.default_width", self.window.default_width),
            ("window.default_height", self.window.default_height),
            ("window.min_width", self.window.min_width),
            ("window.min_height", self.window.min_height),
            ("desktop.viewport_width", self.desktop.viewport_width),
            ("desktop.viewport_height", self.desktop.viewport_height),
        ];
        if let Some((name, value)) = positive.iter().find(|(_, value)| *value <= 0) {
            return Err(ConfigError::Invalid(format!(
                "{name} must be positive, got {value}"
            )));
        }
        if self.window.cascade_wrap == 0 {
            return Err(ConfigError::Invalid(
                "window.cascade_wrap must be at least 1".to_string(),
            ));
        }
        if self.desktop.taskbar_height < 0 {
            return Err(ConfigError::Invalid(format!(
                "desktop.taskbar_height must not be negative, got {}",
                self.desktop.taskbar_height
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn empty_document_yields_defaults() {
        let config = DesktopConfig::from_toml_str("").expect("parse");
        assert_eq!(config, DesktopConfig::default());
        assert_eq!(config.window.default_size(), WindowSize { w: 800, h: 600 });
        assert_eq!(config.window.first_z_index, 100);
        assert_eq!(config.fs.listing, ListingMode::Prefix);
    }

    #[test]
    fn partial_tables_keep_remaining_defaults() {
        let config = DesktopConfig::from_toml_str(
            r#"
            [window]
            cascade_step = 40
            refocus_on_close = true

            [fs]
            listing = "directory"

            [session]
            persist_layout = true
            "#,
        )
        .expect("parse");

        assert_eq!(config.window.cascade_step, 40);
        assert!(config.window.refocus_on_close);
        assert_eq!(config.window.min_width, 400);
        assert_eq!(config.fs.listing, ListingMode::Directory);
        assert!(config.fs.seed_defaults);
        assert!(config.session.persist_layout);
        assert!(!config.session.restore_layout);
    }

    #[test]
    fn invalid_values_are_rejected() {
        let err = DesktopConfig::from_toml_str("[window]\ncascade_wrap = 0\n").expect_err("wrap");
        assert!(matches!(err, ConfigError::Invalid(_)));

        let err = DesktopConfig::from_toml_str("[window]\nmin_width = -5\n").expect_err("width");
        assert!(err.to_string().contains("window.min_width"));

        let err = DesktopConfig::from_toml_str("[fs]\nlisting = \"tree\"\n").expect_err("mode");
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn load_reports_missing_file_as_read_error() {
        let path = std::env::temp_dir().join("desktop-runtime-missing-config.toml");
        let err = DesktopConfig::load(&path).expect_err("missing file");
        assert!(matches!(err, ConfigError::Read { .. }));
        assert!(err.to_string().contains("desktop-runtime-missing-config.toml"));
    }
}
