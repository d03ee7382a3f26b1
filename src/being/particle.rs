use crate::config::BeingConfig;
use crate::math::{hsl_to_rgb, Lcg, Vec3};

/// A single simulated particle belonging to a being.
///
/// `formed_target` and `scattered_target` are fixed at spawn; they are the
/// particle's home and away positions for the rest of the being's life.
#[derive(Debug, Clone)]
pub struct Particle {
    pub position: Vec3,
    pub velocity: Vec3,
    pub formed_target: Vec3,
    pub scattered_target: Vec3,
    pub opacity: f32,
    pub base_opacity: f32,
    pub oscillation_phase: f32,
    pub size: f32,
    pub color: Vec3,
}

impl Particle {
    /// Spawn from a sampled silhouette point, starting at a random position
    /// in the scatter volume around the anchor
    pub fn spawn(sampled: Vec3, anchor: Vec3, config: &BeingConfig, rng: &mut Lcg) -> Self {
        let r = config.scatter_radius;
        let scattered_target = anchor
            + Vec3::new(
                rng.range(-r, r),
                rng.range(-r, r),
                rng.range(-r, r),
            );

        let range = config.color_range;
        let lightness = rng.range(range.l_min, range.l_max);

        Self {
            position: scattered_target,
            velocity: Vec3::ZERO,
            formed_target: sampled + anchor,
            scattered_target,
            opacity: 0.0,
            base_opacity: rng.range(0.6, 1.0),
            oscillation_phase: rng.range(0.0, std::f32::consts::TAU),
            size: config.particle_size * rng.range(0.7, 1.3),
            color: hsl_to_rgb(range.h, range.s, lightness),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineOptions;

    #[test]
    fn test_spawn_targets_fixed_relative_to_anchor() {
        let config = EngineOptions::default().being_config();
        let mut rng = Lcg::new(42);
        let anchor = Vec3::new(10.0, 0.0, -2.0);
        let sampled = Vec3::new(0.5, 1.0, 0.0);

        let p = Particle::spawn(sampled, anchor, &config, &mut rng);

        assert_eq!(p.formed_target, sampled + anchor);
        assert!(p.scattered_target.distance(&anchor) <= config.scatter_radius * 3.0f32.sqrt() + 0.001);
        assert_eq!(p.position, p.scattered_target);
    }

    #[test]
    fn test_spawn_is_seeded() {
        let config = EngineOptions::default().being_config();
        let mut a = Lcg::new(7);
        let mut b = Lcg::new(7);

        let pa = Particle::spawn(Vec3::ZERO, Vec3::ZERO, &config, &mut a);
        let pb = Particle::spawn(Vec3::ZERO, Vec3::ZERO, &config, &mut b);

        assert_eq!(pa.scattered_target, pb.scattered_target);
        assert_eq!(pa.base_opacity, pb.base_opacity);
    }

    #[test]
    fn test_spawn_opacity_starts_transparent() {
        let config = EngineOptions::default().being_config();
        let mut rng = Lcg::new(42);
        let p = Particle::spawn(Vec3::ZERO, Vec3::ZERO, &config, &mut rng);

        assert_eq!(p.opacity, 0.0);
        assert!(p.base_opacity >= 0.6 && p.base_opacity <= 1.0);
    }
}
