//! Target point extraction
//!
//! Turns an arbitrary geometry source into a fixed-size ordered set of
//! formation targets. A sparse source is densified by interpolating between
//! already-collected points; a missing or empty source falls back to the
//! procedural body generator. Sampling never fails.

pub mod body;

pub use body::{BodyType, BodyScale, generate_body_points};

use crate::math::{Lcg, Vec3};

/// Geometry source a being can be converted from.
///
/// The host keeps rendering responsibility; `set_visible` is the handoff
/// contract: the engine hides the source while the being is live and
/// restores it on disposal.
pub trait ShapeSource {
    /// Flat xyz vertex buffer, if the source exposes one
    fn vertex_positions(&self) -> Option<&[f32]>;

    /// Show or hide the source shape in the host renderer
    fn set_visible(&mut self, visible: bool);
}

/// Sample `count` silhouette points from `source`, falling back to the
/// procedural body generator for missing or empty sources.
pub fn sample(
    source: Option<&dyn ShapeSource>,
    count: usize,
    body: BodyType,
    rng: &mut Lcg,
) -> Vec<Vec3> {
    let count = count.max(1);

    let positions = match source.and_then(|s| s.vertex_positions()) {
        Some(p) if p.len() >= 3 => p,
        _ => return generate_body_points(body, count, rng),
    };

    let vertex_count = positions.len() / 3;
    let step = (vertex_count / count).max(1);

    let mut points = Vec::with_capacity(count);
    let mut i = 0;
    while i < vertex_count && points.len() < count {
        points.push(Vec3::new(
            positions[i * 3],
            positions[i * 3 + 1],
            positions[i * 3 + 2],
        ));
        i += step;
    }

    // Sparse source: densify between already-collected points
    while points.len() < count {
        let a = points[rng.index(points.len())];
        let b = points[rng.index(points.len())];
        let t = rng.next_f32();
        points.push(a.lerp(&b, t));
    }

    points
}
