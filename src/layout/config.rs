use crate::error::ConfigError;
use crate::graph::NodeKind;
use serde::{Deserialize, Serialize};
use std::fs;

/// Layout and routing policy. None of these values are part of the graph's identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LayoutConfig {
    pub node_width: f64,
    pub decision_height: f64,
    pub terminator_height: f64,
    /// Vertical distance between the tops of consecutive rows.
    pub level_spacing: f64,
    /// Minimum free gap between two nodes sharing a row.
    pub horizontal_padding: f64,
    /// Distance of the leftmost node and the first row from the canvas origin.
    pub margin: f64,
    pub positive_branch_offset: f64,
    pub negative_branch_offset: f64,
    /// Gap kept between a rerouted connector and the obstacle it avoided.
    pub clearance: f64,
    pub branch_labels: bool,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            node_width: 200.0,
            decision_height: 100.0,
            terminator_height: 60.0,
            level_spacing: 150.0,
            horizontal_padding: 50.0,
            margin: 40.0,
            positive_branch_offset: 20.0,
            negative_branch_offset: 40.0,
            clearance: 15.0,
            branch_labels: true,
        }
    }
}

impl LayoutConfig {
    /// Loads a configuration from a JSON file. Missing fields keep their defaults.
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_string(),
            source,
        })?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn with_node_width(mut self, width: f64) -> Self {
        self.node_width = width;
        self
    }

    pub fn with_level_spacing(mut self, spacing: f64) -> Self {
        self.level_spacing = spacing;
        self
    }

    pub fn with_horizontal_padding(mut self, padding: f64) -> Self {
        self.horizontal_padding = padding;
        self
    }

    pub fn with_branch_labels(mut self, enabled: bool) -> Self {
        self.branch_labels = enabled;
        self
    }

    /// Centre-to-centre distance two nodes in one row must keep.
    pub fn min_spacing(&self) -> f64 {
        self.node_width + self.horizontal_padding
    }

    pub fn node_height(&self, kind: &NodeKind) -> f64 {
        match kind {
            NodeKind::Decision(_) => self.decision_height,
            NodeKind::Terminator(_) => self.terminator_height,
        }
    }
}
