//! Runtime and window configuration.

use std::str::FromStr;

use vulpis_core::ConfigError;
use vulpis_layout::LayoutOptions;

/// How the window occupies the screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum WindowMode {
    #[default]
    #[cfg_attr(feature = "serde", serde(rename = "windowed", alias = ""))]
    Windowed,
    /// Maximized and resizable
    #[cfg_attr(feature = "serde", serde(rename = "full"))]
    Full,
    /// Desktop fullscreen
    #[cfg_attr(feature = "serde", serde(rename = "whole screen"))]
    WholeScreen,
}

impl FromStr for WindowMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "" | "windowed" => Ok(WindowMode::Windowed),
            "full" => Ok(WindowMode::Full),
            "whole screen" => Ok(WindowMode::WholeScreen),
            other => Err(ConfigError::UnknownWindowMode {
                mode: other.to_string(),
            }),
        }
    }
}

/// Window settings.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct WindowConfig {
    pub title: String,
    #[cfg_attr(feature = "serde", serde(alias = "w"))]
    pub width: u32,
    #[cfg_attr(feature = "serde", serde(alias = "h"))]
    pub height: u32,
    pub resizable: bool,
    pub mode: WindowMode,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Vulpis window".to_string(),
            width: 800,
            height: 600,
            resizable: false,
            mode: WindowMode::Windowed,
        }
    }
}

/// Configuration for a [`Runtime`](crate::Runtime).
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RuntimeConfig {
    pub window: WindowConfig,
}

impl RuntimeConfig {
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.window.title = title.into();
        self
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.window.width = width;
        self.window.height = height;
        self
    }

    pub fn with_mode(mut self, mode: WindowMode) -> Self {
        self.window.mode = mode;
        self
    }

    pub fn resizable(mut self, resizable: bool) -> Self {
        self.window.resizable = resizable;
        self
    }

    /// Reject configurations no window can be created for.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.window.width == 0 || self.window.height == 0 {
            return Err(ConfigError::Invalid {
                reason: format!(
                    "window size must be positive, got {}x{}",
                    self.window.width, self.window.height
                ),
            });
        }
        Ok(())
    }

    /// Initial layout options for the configured window.
    pub fn layout_options(&self) -> LayoutOptions {
        LayoutOptions::new(self.window.width as f32, self.window.height as f32)
    }

    /// Parse and validate a configuration from JSON. Missing fields take
    /// their defaults.
    #[cfg(feature = "serde")]
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: RuntimeConfig =
            serde_json::from_str(json).map_err(|e| ConfigError::Invalid {
                reason: e.to_string(),
            })?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RuntimeConfig::default();
        assert_eq!(config.window.title, "Vulpis window");
        assert_eq!((config.window.width, config.window.height), (800, 600));
        assert!(!config.window.resizable);
        assert_eq!(config.layout_options(), LayoutOptions::new(800.0, 600.0));
    }

    #[test]
    fn test_full_mode_is_distinct_from_whole_screen() {
        let full = RuntimeConfig::default().with_mode("full".parse().unwrap());
        assert_eq!(full.window.mode, WindowMode::Full);
        assert_ne!(full.window.mode, WindowMode::WholeScreen);
    }

    #[test]
    fn test_mode_from_str() {
        assert_eq!("full".parse::<WindowMode>().unwrap(), WindowMode::Full);
        assert_eq!("whole screen".parse::<WindowMode>().unwrap(), WindowMode::WholeScreen);
        assert_eq!("".parse::<WindowMode>().unwrap(), WindowMode::Windowed);
        assert!(matches!(
            "tiny".parse::<WindowMode>(),
            Err(ConfigError::UnknownWindowMode { .. })
        ));
    }

    #[test]
    fn test_validate() {
        assert!(RuntimeConfig::default().with_size(0, 10).validate().is_err());
        assert!(RuntimeConfig::default().with_size(1, 1).validate().is_ok());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_from_json() {
        let config = RuntimeConfig::from_json_str(
            r#"{ "window": { "title": "Demo", "w": 1024, "h": 768, "resizable": true, "mode": "whole screen" } }"#,
        )
        .unwrap();
        assert_eq!(config.window.title, "Demo");
        assert_eq!(config.window.width, 1024);
        assert_eq!(config.window.mode, WindowMode::WholeScreen);
        assert!(config.window.resizable);

        let partial = RuntimeConfig::from_json_str(r#"{ "window": { "title": "Only title" } }"#).unwrap();
        assert_eq!(partial.window.width, 800);

        assert!(RuntimeConfig::from_json_str(r#"{ "window": { "w": 0 } }"#).is_err());
        assert!(RuntimeConfig::from_json_str(r#"{ "window": { "mode": "tiny" } }"#).is_err());
    }
}
