// Hit radii and numeric guards shared by placement, picking and rendering.

// Visual node radius (px)
pub const NODE_RADIUS: f64 = 20.0;

// Placement blocking: squared distance < 2.5 * r^2 counts as "on a node"
pub const PLACEMENT_CATCH_FACTOR: f64 = 2.5;
pub const PLACEMENT_CATCH_SQ: f64 = PLACEMENT_CATCH_FACTOR * NODE_RADIUS * NODE_RADIUS;

// Secondary-click node-vs-edge disambiguation: squared distance < r^2
pub const SELECT_CATCH_FACTOR: f64 = 1.0;
pub const SELECT_CATCH_SQ: f64 = SELECT_CATCH_FACTOR * NODE_RADIUS * NODE_RADIUS;

// Edge drawing
pub const CURVE_OFFSET: f64 = 40.0;       // control point offset from the chord midpoint
pub const ARROW_SIZE: f64 = 10.0;
pub const LABEL_POSITION: f64 = 0.7;      // fraction of the way from source to target

#[inline] pub fn clamp01(x: f64) -> f64 { x.max(0.0).min(1.0) }
#[inline] pub fn dist_sq(ax: f64, ay: f64, bx: f64, by: f64) -> f64 { let dx = ax - bx; let dy = ay - by; dx*dx + dy*dy }

#[inline]
pub fn norm2(x: f64, y: f64) -> Option<((f64, f64), f64)> {
    let len = x.hypot(y);
    if len > 0.0 { Some(((x/len, y/len), len)) } else { None }
}
