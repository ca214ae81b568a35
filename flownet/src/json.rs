use crate::error::DocumentError;
use crate::geometry::limits;
use crate::model::{EdgeKey, EdgeValue, NodeId};
use crate::Graph;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;
use std::collections::{BTreeMap, HashSet};

/// Largest magnitude at which every integer is exactly representable in f64.
const EXACT_INT_LIMIT: f64 = 9_007_199_254_740_992.0;

/// Coordinate written as a JSON integer when it has no fractional part.
struct Coord(f64);

impl Serialize for Coord {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        if self.0.fract() == 0.0 && self.0.abs() < EXACT_INT_LIMIT {
            s.serialize_i64(self.0 as i64)
        } else {
            s.serialize_f64(self.0)
        }
    }
}

/// Renders an ordinal pair as `"[i, j]"`.
pub(crate) fn format_edge_key(i: usize, j: usize) -> String {
    format!("[{}, {}]", i, j)
}

/// Parses `"[i, j]"` (whitespace-tolerant; `"(i, j)"` is also accepted) into
/// two ordinals. Ordinals are bare decimal digits, no sign.
pub fn parse_edge_key(s: &str) -> Option<(usize, usize)> {
    let s = s.trim();
    let inner = s
        .strip_prefix('[')
        .and_then(|r| r.strip_suffix(']'))
        .or_else(|| s.strip_prefix('(').and_then(|r| r.strip_suffix(')')))?;
    let mut parts = inner.split(',').map(str::trim);
    let i = parse_ordinal(parts.next()?)?;
    let j = parse_ordinal(parts.next()?)?;
    if parts.next().is_some() {
        return None;
    }
    Some((i, j))
}

fn parse_ordinal(s: &str) -> Option<usize> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

pub fn to_json_impl(g: &Graph) -> Value {
    #[derive(Serialize)]
    struct EdgeSer {
        flow: u64,
        max_flow: u64,
    }
    #[derive(Serialize)]
    struct Doc {
        nodes: Vec<[Coord; 2]>,
        edges: BTreeMap<String, EdgeSer>,
    }
    let nodes = g.nodes().map(|(_, n)| [Coord(n.x), Coord(n.y)]).collect();
    let ord = g.ordinals();
    let ordinal = |id: NodeId| ord.get(id.slot()).copied().flatten();
    let mut edges = BTreeMap::new();
    for (k, v) in g.edges() {
        let (Some(i), Some(j)) = (ordinal(k.source), ordinal(k.target)) else { continue };
        edges.insert(format_edge_key(i, j), EdgeSer { flow: v.flow, max_flow: v.capacity });
    }
    // Serializing plain numbers, strings and maps into a Value cannot fail.
    serde_json::to_value(Doc { nodes, edges }).unwrap_or(Value::Null)
}

pub fn from_json_impl(v: Value) -> Result<Graph, DocumentError> {
    #[derive(Deserialize)]
    struct EdgeDe {
        flow: u64,
        max_flow: u64,
    }
    #[derive(Deserialize)]
    struct DocDe {
        nodes: Vec<(f64, f64)>,
        edges: BTreeMap<String, EdgeDe>,
    }
    let doc: DocDe = serde_json::from_value(v)?;
    if doc.nodes.len() > limits::MAX_NODES {
        return Err(DocumentError::malformed(format!("nodes>{}", limits::MAX_NODES)));
    }
    if doc.edges.len() > limits::MAX_EDGES {
        return Err(DocumentError::malformed(format!("edges>{}", limits::MAX_EDGES)));
    }
    for (i, &(x, y)) in doc.nodes.iter().enumerate() {
        if !limits::in_coord_bounds(x) || !limits::in_coord_bounds(y) {
            return Err(DocumentError::malformed(format!("node {} coordinate out of bounds", i)));
        }
    }
    let n = doc.nodes.len();
    let mut seen = HashSet::new();
    let mut edges = Vec::with_capacity(doc.edges.len());
    for (raw, e) in &doc.edges {
        let (i, j) = parse_edge_key(raw)
            .ok_or_else(|| DocumentError::malformed(format!("edge key {:?} is not a pair of integers", raw)))?;
        if i >= n || j >= n {
            return Err(DocumentError::malformed(format!("edge {:?} references a missing node", raw)));
        }
        if i == j {
            return Err(DocumentError::malformed(format!("edge {:?} is a self-loop", raw)));
        }
        if !seen.insert((i, j)) {
            return Err(DocumentError::malformed(format!("edge {:?} appears twice", raw)));
        }
        if e.flow > e.max_flow {
            return Err(DocumentError::malformed(format!("edge {:?} has flow above max_flow", raw)));
        }
        edges.push((EdgeKey::new(NodeId(i as u32), NodeId(j as u32)), EdgeValue::new(e.flow, e.max_flow)));
    }

    let mut g = Graph::new();
    for (x, y) in doc.nodes {
        g.push_node(x, y);
    }
    g.edges.extend(edges);
    Ok(g)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edge_key_forms() {
        assert_eq!(parse_edge_key("[0, 2]"), Some((0, 2)));
        assert_eq!(parse_edge_key(" [ 10 ,3 ] "), Some((10, 3)));
        assert_eq!(parse_edge_key("(4, 5)"), Some((4, 5)));
        assert_eq!(parse_edge_key("[1, 2, 3]"), None);
        assert_eq!(parse_edge_key("[1]"), None);
        assert_eq!(parse_edge_key("[-1, 2]"), None);
        assert_eq!(parse_edge_key("[+0, 1]"), None);
        assert_eq!(parse_edge_key("[0, +1]"), None);
        assert_eq!(parse_edge_key("[, 1]"), None);
        assert_eq!(parse_edge_key("[a, b]"), None);
        assert_eq!(parse_edge_key("1, 2"), None);
        assert_eq!(parse_edge_key("[1, 2)"), None);
        assert_eq!(format_edge_key(0, 2), "[0, 2]");
    }

    #[test]
    fn integral_coordinates_stay_integers() {
        let mut g = Graph::new();
        g.add_node(100.0, 100.5).unwrap();
        let v = to_json_impl(&g);
        assert_eq!(v, serde_json::json!({"nodes": [[100, 100.5]], "edges": {}}));
        assert!(v["nodes"][0][0].is_i64());
        assert!(v["nodes"][0][1].is_f64());
    }
}
