use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable node handle. The value is the node's slot in the graph's slot
/// vector; slots are never reused, so removing other nodes does not change it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub u32);

impl NodeId {
    #[inline]
    pub fn slot(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub x: f64,
    pub y: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl From<Node> for Vec2 {
    fn from(n: Node) -> Self {
        Vec2 { x: n.x, y: n.y }
    }
}

/// Directed edge identity: at most one edge exists per ordered pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EdgeKey {
    pub source: NodeId,
    pub target: NodeId,
}

impl EdgeKey {
    pub fn new(source: NodeId, target: NodeId) -> Self {
        EdgeKey { source, target }
    }
    pub fn touches(&self, id: NodeId) -> bool {
        self.source == id || self.target == id
    }
    pub fn reversed(&self) -> EdgeKey {
        EdgeKey { source: self.target, target: self.source }
    }
}

impl fmt::Display for EdgeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.source, self.target)
    }
}

/// Flow and capacity labels of one edge. Invariant: `flow <= capacity`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeValue {
    pub flow: u64,
    pub capacity: u64,
}

impl EdgeValue {
    pub fn new(flow: u64, capacity: u64) -> Self {
        EdgeValue { flow, capacity }
    }
    pub fn is_valid(&self) -> bool {
        self.flow <= self.capacity
    }
}

impl fmt::Display for EdgeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.flow, self.capacity)
    }
}

/// Two-click connect protocol: the first click arms an endpoint, the second
/// one resolves it and always returns to `Idle`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "node", rename_all = "snake_case")]
pub enum ConnectState {
    #[default]
    Idle,
    Armed(NodeId),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ConnectOutcome {
    Armed { node: NodeId },
    Created { edge: EdgeKey },
    AlreadyExists { edge: EdgeKey },
    Cancelled { node: NodeId },
}

/// Flat node arrays for renderers: `positions` holds `x, y` pairs in the same
/// (ordinal) order as `ids`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NodeArrays {
    pub ids: Vec<u32>,
    pub positions: Vec<f64>,
}

/// Flat edge arrays for renderers: `endpoints` holds `source, target` pairs.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EdgeArrays {
    pub endpoints: Vec<u32>,
    pub flows: Vec<u64>,
    pub capacities: Vec<u64>,
}
