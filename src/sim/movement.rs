//! Axis-separated movement against level geometry
//!
//! Each axis is tried on its own so a diagonal move into a wall slides
//! along it instead of stopping dead.

use glam::Vec2;

use super::geometry::{Bounds, Geometry};

/// Resolve a requested move of `delta` for a square of side `size`
///
/// The X move is committed only if unblocked at the original Y; the Y move is
/// then tested against the (possibly updated) X. The result is clamped to
/// `[size/2, dim - size/2]` on both axes.
pub fn resolve_move(geometry: &Geometry, bounds: &Bounds, pos: Vec2, delta: Vec2, size: f32) -> Vec2 {
    let mut out = pos;

    if delta.x != 0.0 {
        let candidate = Vec2::new(pos.x + delta.x, out.y);
        if !geometry.is_blocked(candidate, size) {
            out.x = candidate.x;
        }
    }

    if delta.y != 0.0 {
        let candidate = Vec2::new(out.x, pos.y + delta.y);
        if !geometry.is_blocked(candidate, size) {
            out.y = candidate.y;
        }
    }

    bounds.clamp(out, size)
}
