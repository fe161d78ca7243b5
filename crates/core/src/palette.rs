//! Presentation colors for acquisition sources and age groups.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::{PulseError, PulseResult};
use crate::types::{AcquisitionSource, AgeGroup};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceColors {
    pub node_color: String,
    pub link_color: String,
}

impl SourceColors {
    pub fn new(node_color: impl Into<String>, link_color: impl Into<String>) -> Self {
        Self {
            node_color: node_color.into(),
            link_color: link_color.into(),
        }
    }
}

/// Source and age-group lookup tables. Source keys are lowercase channel
/// names; a channel missing from the table is a configuration error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorPalette {
    #[serde(default = "default_source_colors")]
    pub sources: BTreeMap<String, SourceColors>,
}

fn default_source_colors() -> BTreeMap<String, SourceColors> {
    [
        ("google", "#FF4545", "rgba(227, 76, 79, 0.4)"),
        ("facebook", "#4285F4", "rgba(66, 103, 178, 0.4)"),
        ("instagram", "#C13584", "rgba(193, 53, 132, 0.4)"),
        ("tiktok", "#000000", "rgba(0, 0, 0, 0.4)"),
        ("twitter", "#1DA1F2", "rgba(29, 161, 242, 0.4)"),
        ("pinterest", "#E60023", "rgba(230, 0, 35, 0.4)"),
        ("linkedin", "#0A66C2", "rgba(10, 102, 194, 0.4)"),
    ]
    .into_iter()
    .map(|(name, node, link)| (name.to_string(), SourceColors::new(node, link)))
    .collect()
}

impl Default for ColorPalette {
    fn default() -> Self {
        Self {
            sources: default_source_colors(),
        }
    }
}

impl ColorPalette {
    pub fn source(&self, source: &AcquisitionSource) -> PulseResult<&SourceColors> {
        self.sources
            .get(source.as_str())
            .ok_or_else(|| PulseError::UnknownSource(source.to_string()))
    }

    /// Layers `overrides` on top of this palette; entries with the same
    /// (normalised) name replace the existing colors.
    pub fn merged(mut self, overrides: BTreeMap<String, SourceColors>) -> Self {
        for (name, colors) in overrides {
            self.sources
                .insert(AcquisitionSource::new(name).as_str().to_string(), colors);
        }
        self
    }

    pub fn age_group(&self, group: AgeGroup) -> &'static str {
        match group {
            AgeGroup::Under15 => "#D3D3D3",
            AgeGroup::From15To19 => "#D3D3D3",
            AgeGroup::From20To29 => "#B0BEC5",
            AgeGroup::From30To39 => "#90A4AE",
            AgeGroup::From40To49 => "#78909C",
            AgeGroup::Over50 => "#37474F",
        }
    }
}
