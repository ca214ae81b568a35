use crate::config::EditorConfig;
use crate::geometry::math::seg_distance;
use crate::geometry::tolerance::dist_sq;
use crate::model::{EdgeKey, NodeId};
use crate::Graph;
use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Pick {
    Node { id: NodeId, dist: f64 },
    Edge { key: EdgeKey, dist: f64 },
}

/// Nearest node by squared distance, if strictly inside `catch_sq`.
/// Equal distances resolve to the lowest ordinal.
pub fn closest_node_impl(g: &Graph, x: f64, y: f64, catch_sq: f64) -> Option<NodeId> {
    let mut best: Option<(NodeId, f64)> = None;
    for (id, n) in g.nodes() {
        let d2 = dist_sq(n.x, n.y, x, y);
        if best.map_or(true, |(_, bd)| d2 < bd) { best = Some((id, d2)); }
    }
    best.filter(|&(_, d2)| d2 < catch_sq).map(|(id, _)| id)
}

/// Nearest edge by distance to its straight chord; no distance threshold.
///
/// Zero-length edges are skipped. When the two first edges (in key order) at
/// the minimum distance tie exactly, the one whose target node is nearer wins;
/// if that ties as well the earlier key wins.
pub fn closest_edge_impl(g: &Graph, x: f64, y: f64) -> Option<EdgeKey> {
    let mut best: Option<(EdgeKey, f64)> = None;
    let mut runner: Option<EdgeKey> = None;
    for (key, _) in g.edges() {
        let (Some(a), Some(b)) = (g.get_node(key.source), g.get_node(key.target)) else { continue };
        let Some(d) = seg_distance(x, y, a.x, a.y, b.x, b.y) else { continue };
        match best {
            None => best = Some((key, d)),
            Some((_, bd)) if d < bd => { best = Some((key, d)); runner = None; }
            Some((_, bd)) if d == bd => { if runner.is_none() { runner = Some(key); } }
            _ => {}
        }
    }
    let (first, _) = best?;
    let Some(second) = runner else { return Some(first) };
    let d1 = target_distance(g, first, x, y);
    let d2 = target_distance(g, second, x, y);
    Some(if d2 < d1 { second } else { first })
}

fn target_distance(g: &Graph, key: EdgeKey, x: f64, y: f64) -> f64 {
    g.get_node(key.target).map_or(f64::INFINITY, |n| (n.x - x).hypot(n.y - y))
}

/// Secondary-click classification: a node inside the select radius wins,
/// otherwise the closest edge.
pub fn pick_impl(g: &Graph, x: f64, y: f64, cfg: &EditorConfig) -> Option<Pick> {
    if let Some(id) = closest_node_impl(g, x, y, cfg.select_catch_sq()) {
        let n = g.get_node(id)?;
        return Some(Pick::Node { id, dist: dist_sq(n.x, n.y, x, y).sqrt() });
    }
    let key = closest_edge_impl(g, x, y)?;
    let a = g.get_node(key.source)?;
    let b = g.get_node(key.target)?;
    let dist = seg_distance(x, y, a.x, a.y, b.x, b.y)?;
    Some(Pick::Edge { key, dist })
}
