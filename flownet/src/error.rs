//! Error taxonomy of the editing engine.
//!
//! `GraphError` signals a caller passing an identity the model does not hold
//! (a logic bug on resolver-driven paths) or a position outside the document
//! coordinate range. Validation and document errors are
//! user-facing and always recoverable: the graph is left untouched.

use crate::model::{EdgeKey, NodeId};
use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum GraphError {
    #[error("node {0} not found")]
    NodeNotFound(NodeId),
    #[error("edge {0} not found")]
    EdgeNotFound(EdgeKey),
    #[error("edge endpoints are both {0}")]
    SelfLoop(NodeId),
    #[error("edge {0} already exists")]
    DuplicateEdge(EdgeKey),
    #[error("position ({x}, {y}) is outside the canvas bounds")]
    OutOfBounds { x: f64, y: f64 },
}

impl GraphError {
    pub fn code(&self) -> &'static str {
        match self {
            GraphError::NodeNotFound(_) | GraphError::EdgeNotFound(_) => "not_found",
            GraphError::SelfLoop(_) => "self_loop",
            GraphError::DuplicateEdge(_) => "duplicate_edge",
            GraphError::OutOfBounds { .. } => "out_of_bounds",
        }
    }
}

/// Which dialog field a value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Flow,
    Capacity,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::Flow => f.write_str("Current flow"),
            Field::Capacity => f.write_str("Max flow"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field} must be an integer, got {input:?}")]
    Parse { field: Field, input: String },
    #[error("Both values must be >= 0")]
    NegativeValue { flow: i64, capacity: i64 },
    #[error("Current flow cannot exceed max flow")]
    FlowExceedsCapacity { flow: u64, capacity: u64 },
}

impl ValidationError {
    pub fn code(&self) -> &'static str {
        match self {
            ValidationError::Parse { .. } => "parse_error",
            ValidationError::NegativeValue { .. } => "negative_value",
            ValidationError::FlowExceedsCapacity { .. } => "flow_exceeds_capacity",
        }
    }

    /// Text shown in the warning box.
    pub fn user_message(&self) -> String {
        format!("Invalid: {}", self)
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum EditError {
    #[error(transparent)]
    Graph(#[from] GraphError),
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl EditError {
    pub fn code(&self) -> &'static str {
        match self {
            EditError::Graph(e) => e.code(),
            EditError::Validation(e) => e.code(),
        }
    }
}

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("malformed document: {0}")]
    Malformed(String),
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

impl DocumentError {
    pub fn malformed(reason: impl Into<String>) -> Self {
        DocumentError::Malformed(reason.into())
    }

    pub fn code(&self) -> &'static str {
        match self {
            DocumentError::Malformed(_) => "malformed_document",
            DocumentError::Io(_) => "io_error",
        }
    }
}

impl From<serde_json::Error> for DocumentError {
    fn from(e: serde_json::Error) -> Self {
        if e.is_io() {
            DocumentError::Io(e.into())
        } else {
            DocumentError::Malformed(e.to_string())
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("config field '{field}' must be finite and > 0, got {value}")]
    OutOfRange { field: &'static str, value: f64 },
}

impl ConfigError {
    pub fn code(&self) -> &'static str {
        "invalid_config"
    }
}
