//! Editor tunables. Defaults come from `geometry::tolerance`; a shell may
//! override any subset from a JSON document.

use crate::error::ConfigError;
use crate::geometry::tolerance::{
    ARROW_SIZE, CURVE_OFFSET, LABEL_POSITION, NODE_RADIUS, PLACEMENT_CATCH_FACTOR,
    SELECT_CATCH_FACTOR,
};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Visual node radius in canvas units.
    pub node_radius: f64,
    /// Multiplier on `node_radius²` below which a primary click counts as
    /// landing on a node (and a new node is refused).
    pub placement_catch_factor: f64,
    /// Multiplier on `node_radius²` below which a secondary click grabs a
    /// node for dragging instead of picking an edge.
    pub select_catch_factor: f64,
    pub curve_offset: f64,
    pub arrow_size: f64,
    pub label_position: f64,
}

impl Default for EditorConfig {
    fn default() -> Self {
        EditorConfig {
            node_radius: NODE_RADIUS,
            placement_catch_factor: PLACEMENT_CATCH_FACTOR,
            select_catch_factor: SELECT_CATCH_FACTOR,
            curve_offset: CURVE_OFFSET,
            arrow_size: ARROW_SIZE,
            label_position: LABEL_POSITION,
        }
    }
}

impl EditorConfig {
    pub fn placement_catch_sq(&self) -> f64 {
        self.placement_catch_factor * self.node_radius * self.node_radius
    }

    pub fn select_catch_sq(&self) -> f64 {
        self.select_catch_factor * self.node_radius * self.node_radius
    }

    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let cfg: EditorConfig = serde_json::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let fields = [
            ("node_radius", self.node_radius),
            ("placement_catch_factor", self.placement_catch_factor),
            ("select_catch_factor", self.select_catch_factor),
            ("curve_offset", self.curve_offset),
            ("arrow_size", self.arrow_size),
            ("label_position", self.label_position),
        ];
        for (field, value) in fields {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::OutOfRange { field, value });
            }
        }
        Ok(())
    }
}
