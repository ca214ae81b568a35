//! Placement geometry for drawing a directed edge.
//!
//! The stroke is a quadratic curve bowed to the left of the direction of
//! travel so that `a -> b` and `b -> a` stay visually apart. Hit-testing does
//! not use this curve; it works on the straight chord.

use super::tolerance::norm2;
use crate::config::EditorConfig;
use crate::model::Vec2;
use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct EdgeCurve {
    /// Curve start, on the source node's rim.
    pub start: Vec2,
    pub control: Vec2,
    /// Curve end, on the target node's rim; also the arrow tip.
    pub end: Vec2,
    pub arrow_left: Vec2,
    pub arrow_right: Vec2,
    /// Anchor of the `flow/capacity` text.
    pub label: Vec2,
}

impl EdgeCurve {
    pub fn point_at(&self, t: f64) -> Vec2 {
        let u = 1.0 - t;
        Vec2 {
            x: u*u*self.start.x + 2.0*u*t*self.control.x + t*t*self.end.x,
            y: u*u*self.start.y + 2.0*u*t*self.control.y + t*t*self.end.y,
        }
    }

    /// Flat `[start, control, end, arrow_left, arrow_right, label]` coordinates.
    pub fn to_array(&self) -> [f64; 12] {
        [
            self.start.x, self.start.y, self.control.x, self.control.y, self.end.x, self.end.y,
            self.arrow_left.x, self.arrow_left.y, self.arrow_right.x, self.arrow_right.y,
            self.label.x, self.label.y,
        ]
    }
}

/// `None` when the endpoints coincide.
pub fn edge_curve(a: Vec2, b: Vec2, cfg: &EditorConfig) -> Option<EdgeCurve> {
    let ((dx, dy), _) = norm2(b.x - a.x, b.y - a.y)?;
    let r = cfg.node_radius;
    let start = Vec2 { x: a.x + dx * r, y: a.y + dy * r };
    let end = Vec2 { x: b.x - dx * r, y: b.y - dy * r };
    let midx = 0.5 * (start.x + end.x);
    let midy = 0.5 * (start.y + end.y);
    let off = cfg.curve_offset;
    let control = Vec2 { x: midx - dy * off, y: midy + dx * off };
    let s = cfg.arrow_size;
    let arrow_left = Vec2 { x: end.x - dy * s - dx * s, y: end.y + dx * s - dy * s };
    let arrow_right = Vec2 { x: end.x + dy * s - dx * s, y: end.y - dx * s - dy * s };
    let lt = cfg.label_position;
    let label = Vec2 { x: a.x + lt * (b.x - a.x), y: a.y + lt * (b.y - a.y) };
    Some(EdgeCurve { start, control, end, arrow_left, arrow_right, label })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(x: f64, y: f64) -> Vec2 { Vec2 { x, y } }

    #[test]
    fn horizontal_edge_layout() {
        let cfg = EditorConfig::default();
        let c = edge_curve(v(0.0, 0.0), v(100.0, 0.0), &cfg).unwrap();
        assert_eq!(c.start, v(20.0, 0.0));
        assert_eq!(c.end, v(80.0, 0.0));
        assert_eq!(c.control, v(50.0, 40.0));
        assert_eq!(c.arrow_left, v(70.0, 10.0));
        assert_eq!(c.arrow_right, v(70.0, -10.0));
        assert!((c.label.x - 70.0).abs() < 1e-9 && c.label.y == 0.0);
    }

    #[test]
    fn reverse_edge_bows_the_other_way() {
        let cfg = EditorConfig::default();
        let ab = edge_curve(v(0.0, 0.0), v(100.0, 0.0), &cfg).unwrap();
        let ba = edge_curve(v(100.0, 0.0), v(0.0, 0.0), &cfg).unwrap();
        assert!(ab.point_at(0.5).y > 0.0);
        assert!(ba.point_at(0.5).y < 0.0);
    }

    #[test]
    fn coincident_endpoints_have_no_curve() {
        assert!(edge_curve(v(3.0, 3.0), v(3.0, 3.0), &EditorConfig::default()).is_none());
    }
}
