//! Procedural anthropomorphic point cloud
//!
//! Fallback silhouette used when a being is converted without a usable
//! geometry source. Points are distributed across five anatomical regions:
//! head, torso, two arms, and two legs, scaled by a body-type triple.

use serde::Deserialize;

use crate::math::{Lcg, Vec3};

/// Body-type tag selecting a `{height, width, head_size}` scale triple
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BodyType {
    Child,
    #[default]
    Adult,
    Athletic,
    Elderly,
    Pregnant,
}

/// Scale triple applied to the silhouette proportions
#[derive(Debug, Clone, Copy)]
pub struct BodyScale {
    pub height: f32,
    pub width: f32,
    pub head_size: f32,
}

impl BodyType {
    pub fn scale(&self) -> BodyScale {
        match self {
            BodyType::Child => BodyScale { height: 1.1, width: 0.8, head_size: 1.3 },
            BodyType::Adult => BodyScale { height: 1.7, width: 1.0, head_size: 1.0 },
            BodyType::Athletic => BodyScale { height: 1.8, width: 1.15, head_size: 0.95 },
            BodyType::Elderly => BodyScale { height: 1.6, width: 0.95, head_size: 1.0 },
            BodyType::Pregnant => BodyScale { height: 1.65, width: 1.25, head_size: 1.0 },
        }
    }

}

/// Region split: head 15%, torso 35%, arms 25%, legs the remainder
fn region_counts(count: usize) -> (usize, usize, usize, usize) {
    let head = count * 15 / 100;
    let torso = count * 35 / 100;
    let arms = count * 25 / 100;
    let legs = count - head - torso - arms;
    (head, torso, arms, legs)
}

/// Generate `count` points forming a standing figure, feet at y = 0
pub fn generate_body_points(body: BodyType, count: usize, rng: &mut Lcg) -> Vec<Vec3> {
    let count = count.max(1);
    let s = body.scale();
    let (head, torso, arms, legs) = region_counts(count);

    let mut points = Vec::with_capacity(count);

    // Head: sphere surface above the shoulders
    let head_center = Vec3::new(0.0, 0.9 * s.height, 0.0);
    let head_radius = 0.09 * s.height * s.head_size;
    for _ in 0..head {
        let z = rng.range(-1.0, 1.0);
        let theta = rng.range(0.0, std::f32::consts::TAU);
        let ring = (1.0 - z * z).max(0.0).sqrt();
        points.push(
            head_center
                + Vec3::new(ring * theta.cos(), z, ring * theta.sin()).scale(head_radius),
        );
    }

    // Torso: tapering cylindrical band, hips to shoulders
    let torso_bottom = 0.48 * s.height;
    let torso_top = 0.82 * s.height;
    for _ in 0..torso {
        let t = rng.next_f32();
        let radius = (0.16 - 0.05 * t) * s.width;
        let theta = rng.range(0.0, std::f32::consts::TAU);
        points.push(Vec3::new(
            theta.cos() * radius,
            torso_bottom + (torso_top - torso_bottom) * t,
            theta.sin() * radius,
        ));
    }

    // Arms: two downward-angled segments from the shoulders
    let shoulder_y = 0.8 * s.height;
    let hand_y = 0.5 * s.height;
    for i in 0..arms {
        let side = if i % 2 == 0 { 1.0 } else { -1.0 };
        let t = rng.next_f32();
        let x = side * (0.2 + 0.14 * t) * s.width;
        let y = shoulder_y + (hand_y - shoulder_y) * t;
        points.push(Vec3::new(x, y, 0.0) + jitter(rng, 0.02 * s.width));
    }

    // Legs: two vertical segments, hips to feet
    let hip_y = 0.48 * s.height;
    for i in 0..legs {
        let side = if i % 2 == 0 { 1.0 } else { -1.0 };
        let t = rng.next_f32();
        points.push(
            Vec3::new(side * 0.12 * s.width, hip_y * (1.0 - t), 0.0)
                + jitter(rng, 0.02 * s.width),
        );
    }

    points
}

fn jitter(rng: &mut Lcg, amount: f32) -> Vec3 {
    Vec3::new(
        rng.range(-amount, amount),
        rng.range(-amount, amount),
        rng.range(-amount, amount),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_count() {
        let mut rng = Lcg::new(42);
        for count in [1, 7, 64, 500] {
            let points = generate_body_points(BodyType::Adult, count, &mut rng);
            assert_eq!(points.len(), count);
        }
    }

    #[test]
    fn test_region_split_sums() {
        for count in [1, 10, 64, 99, 1000] {
            let (head, torso, arms, legs) = region_counts(count);
            assert_eq!(head + torso + arms + legs, count);
        }
    }

    #[test]
    fn test_figure_stands_on_ground() {
        let mut rng = Lcg::new(1);
        let points = generate_body_points(BodyType::Adult, 200, &mut rng);
        let scale = BodyType::Adult.scale();

        for p in &points {
            assert!(p.y > -0.1, "point below the ground plane: {:?}", p);
            assert!(p.y < scale.height * 1.1, "point above the head: {:?}", p);
        }
    }

    #[test]
    fn test_body_types_differ() {
        let child = BodyType::Child.scale();
        let adult = BodyType::Adult.scale();
        let athletic = BodyType::Athletic.scale();

        assert!(child.height < adult.height);
        assert!(child.head_size > adult.head_size);
        assert!(athletic.width > adult.width);
    }

    #[test]
    fn test_child_is_shorter() {
        let mut rng = Lcg::new(42);
        let child = generate_body_points(BodyType::Child, 300, &mut rng);
        let adult = generate_body_points(BodyType::Adult, 300, &mut rng);

        let max_y = |pts: &[Vec3]| pts.iter().fold(0.0f32, |m, p| m.max(p.y));
        assert!(max_y(&child) < max_y(&adult));
    }

}
