use super::tolerance::clamp01;

/// Squared distance from `p` to the segment `(x1,y1)-(x2,y2)` and the clamped
/// projection parameter. `None` for a zero-length segment.
pub fn seg_distance_sq(px: f64, py: f64, x1: f64, y1: f64, x2: f64, y2: f64) -> Option<(f64, f64)> {
    let vx = x2 - x1; let vy = y2 - y1;
    let wx = px - x1; let wy = py - y1;
    let vv = vx*vx + vy*vy;
    if vv == 0.0 { return None; }
    let t = clamp01((wx*vx + wy*vy) / vv);
    let projx = x1 + t * vx; let projy = y1 + t * vy;
    let dx = px - projx; let dy = py - projy;
    Some((dx*dx + dy*dy, t))
}

/// Euclidean distance from `p` to the segment; `None` for a zero-length segment.
pub fn seg_distance(px: f64, py: f64, x1: f64, y1: f64, x2: f64, y2: f64) -> Option<f64> {
    seg_distance_sq(px, py, x1, y1, x2, y2).map(|(d2, _)| d2.sqrt())
}
