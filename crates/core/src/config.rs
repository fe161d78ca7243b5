use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

use crate::error::PulseResult;
use crate::palette::{ColorPalette, SourceColors};
use crate::types::TimeRange;

/// Root application configuration. Loaded from an optional TOML file and
/// environment variables with the prefix `PULSE__`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub dashboard: DashboardConfig,
    #[serde(default)]
    pub palette: PaletteConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DashboardConfig {
    /// Range used when the caller does not pick one.
    #[serde(default)]
    pub default_range: TimeRange,
}

/// Source colors layered over the built-in palette. Keys are channel names.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PaletteConfig {
    #[serde(default)]
    pub sources: BTreeMap<String, SourceColors>,
}

impl AppConfig {
    /// Load configuration from environment variables and an optional config file.
    /// A file that is named but missing or malformed is an error.
    pub fn load(file: Option<&Path>) -> PulseResult<Self> {
        let mut builder = config::Config::builder();

        if let Some(path) = file {
            builder = builder.add_source(config::File::from(path).required(true));
        }

        let config = builder
            .add_source(
                config::Environment::with_prefix("PULSE")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;
        Ok(config.try_deserialize()?)
    }

    /// Built-in palette with any configured source colors applied.
    pub fn palette(&self) -> ColorPalette {
        ColorPalette::default().merged(self.palette.sources.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PulseError;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.dashboard.default_range, TimeRange::Last7Days);
        assert_eq!(config.palette(), ColorPalette::default());
    }

    #[test]
    fn test_deserialize_from_toml_source() {
        let raw = r##"
            [dashboard]
            default_range = "30d"

            [palette.sources.direct]
            node_color = "#123456"
            link_color = "rgba(18, 52, 86, 0.4)"
        "##;
        let config: AppConfig = config::Config::builder()
            .add_source(config::File::from_str(raw, config::FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.dashboard.default_range, TimeRange::Last30Days);
        let palette = config.palette();
        assert_eq!(palette.source(&"direct".into()).unwrap().node_color, "#123456");
        assert!(palette.source(&"google".into()).is_ok());
    }

    #[test]
    fn test_named_file_must_exist() {
        let err = AppConfig::load(Some(Path::new("/nonexistent/pulse.toml"))).unwrap_err();
        assert!(matches!(err, PulseError::Config(_)));
    }

    #[test]
    fn test_malformed_file_is_rejected() {
        let path = std::env::temp_dir().join(format!("pulse-config-{}.toml", std::process::id()));
        std::fs::write(&path, "[dashboard]\ndefault_range = \"90d\"\n").unwrap();
        let result = AppConfig::load(Some(&path));
        std::fs::remove_file(&path).unwrap();
        assert!(matches!(result, Err(PulseError::Config(_))));
    }
}
