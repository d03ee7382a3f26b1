//! Ambient field: free-drifting background particles
//!
//! Decoupled from any being's lifecycle. Particles drift under a
//! slowly-varying personal bias inside a toroidal bounding box; leaving one
//! face re-enters on the opposite face with velocity unchanged.

use crate::config::AmbientConfig;
use crate::math::{hsl_to_rgb, Lcg, Vec3};

/// A background particle with no lifecycle
#[derive(Debug, Clone)]
pub struct AmbientParticle {
    pub position: Vec3,
    pub velocity: Vec3,
    /// Slowly-varying personal bias added to velocity each frame
    pub drift: Vec3,
    pub opacity: f32,
    base_opacity: f32,
    /// Phase offset decorrelating the drift noise between particles
    noise_phase: f32,
    size: f32,
    color: Vec3,
}

/// Population of ambient particles inside a wrap-around bounding box
pub struct AmbientField {
    particles: Vec<AmbientParticle>,
    config: AmbientConfig,
    rng: Lcg,
}

impl AmbientField {
    pub fn new(config: AmbientConfig, seed: u32) -> Self {
        Self {
            particles: Vec::new(),
            config,
            rng: Lcg::new(seed),
        }
    }

    /// Spawn `count` particles at uniformly random positions in the box
    pub fn spawn(&mut self, count: usize) {
        let b = self.config.bounds;
        for _ in 0..count {
            let position = Vec3::new(
                self.rng.range(-b.x, b.x),
                self.rng.range(-b.y, b.y),
                self.rng.range(-b.z, b.z),
            );
            let hue = self.rng.range(0.5, 0.65);
            self.particles.push(AmbientParticle {
                position,
                velocity: Vec3::ZERO,
                drift: Vec3::ZERO,
                opacity: 0.0,
                base_opacity: self.config.base_opacity * self.rng.range(0.7, 1.0),
                noise_phase: self.rng.range(0.0, 100.0),
                size: self.config.particle_size * self.rng.range(0.7, 1.3),
                color: hsl_to_rgb(hue, 0.4, 0.8),
            });
        }
    }

    pub fn update(&mut self, _dt: f32, time: f32) {
        let config = self.config;
        let b = config.bounds;

        for p in &mut self.particles {
            // Re-noise the bias slowly so paths meander instead of
            // settling into straight lines
            p.drift = Vec3::new(
                simplex_noise(p.position.x * 0.5, time * 0.1 + p.noise_phase),
                simplex_noise(p.position.y * 0.5, time * 0.08 + p.noise_phase + 100.0),
                simplex_noise(p.position.z * 0.5, time * 0.12 + p.noise_phase + 200.0),
            )
            .scale(config.drift_strength);

            p.velocity = p.velocity + p.drift;
            p.position = p.position + p.velocity;
            p.velocity = p.velocity.scale(config.damping);

            // Toroidal wrap, never a bounce
            p.position.x = wrap(p.position.x, b.x);
            p.position.y = wrap(p.position.y, b.y);
            p.position.z = wrap(p.position.z, b.z);

            let pulse = 1.0
                + config.pulse_amplitude
                    * (time * config.pulse_frequency + p.position.x * config.spatial_frequency)
                        .sin();
            p.opacity = (p.base_opacity * pulse).clamp(0.0, 1.0);
        }
    }

    /// Flat render buffer: position(3) + size(1) + alpha(1) + color(3)
    pub fn data(&self) -> Vec<f32> {
        let mut data = Vec::with_capacity(self.particles.len() * 8);
        for p in &self.particles {
            data.push(p.position.x);
            data.push(p.position.y);
            data.push(p.position.z);
            data.push(p.size);
            data.push(p.opacity);
            data.push(p.color.x);
            data.push(p.color.y);
            data.push(p.color.z);
        }
        data
    }

    pub fn count(&self) -> usize {
        self.particles.len()
    }

    pub fn clear(&mut self) {
        self.particles.clear();
    }

    #[cfg(test)]
    pub(crate) fn particles_mut(&mut self) -> &mut Vec<AmbientParticle> {
        &mut self.particles
    }

    pub fn particles(&self) -> &[AmbientParticle] {
        &self.particles
    }
}

/// Wrap a coordinate into [-extent, extent], exiting one face and entering
/// the opposite one
fn wrap(value: f32, extent: f32) -> f32 {
    if value > extent {
        -extent
    } else if value < -extent {
        extent
    } else {
        value
    }
}

fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Simple simplex-like noise
fn simplex_noise(x: f32, y: f32) -> f32 {
    let x = x + y * 0.5;
    let y = y + x * 0.3;

    // Euclidean fraction: stays in [0, 1) for negative coordinates too
    let fx = x - x.floor();
    let fy = y - y.floor();

    let h00 = hash2d(x.floor() as i32, y.floor() as i32);
    let h10 = hash2d(x.floor() as i32 + 1, y.floor() as i32);
    let h01 = hash2d(x.floor() as i32, y.floor() as i32 + 1);
    let h11 = hash2d(x.floor() as i32 + 1, y.floor() as i32 + 1);

    let u = fx * fx * (3.0 - 2.0 * fx);
    let v = fy * fy * (3.0 - 2.0 * fy);

    let a = lerp(h00, h10, u);
    let b = lerp(h01, h11, u);

    lerp(a, b, v) * 2.0 - 1.0
}

fn hash2d(x: i32, y: i32) -> f32 {
    let n = x.wrapping_mul(374761393).wrapping_add(y.wrapping_mul(668265263));
    let n = (n ^ (n >> 13)).wrapping_mul(1274126177);
    (n as u32 as f32) / (u32::MAX as f32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AmbientConfig;

    const FRAME: f32 = 1.0 / 60.0;

    fn field() -> AmbientField {
        AmbientField::new(AmbientConfig::default(), 42)
    }

    #[test]
    fn test_spawn_count_and_bounds() {
        let mut field = field();
        field.spawn(100);
        assert_eq!(field.count(), 100);

        let b = AmbientConfig::default().bounds;
        for p in field.particles() {
            assert!(p.position.x.abs() <= b.x);
            assert!(p.position.y.abs() <= b.y);
            assert!(p.position.z.abs() <= b.z);
        }
    }

    #[test]
    fn test_wrap_to_opposite_face() {
        let mut field = field();
        field.spawn(1);

        let b = AmbientConfig::default().bounds;
        {
            let p = &mut field.particles_mut()[0];
            p.position = Vec3::new(b.x + 3.0, 0.0, 0.0);
            p.velocity = Vec3::new(0.5, 0.0, 0.0);
        }

        field.update(FRAME, 0.0);

        let p = &field.particles()[0];
        assert_eq!(p.position.x, -b.x);
        // Wrap leaves the velocity direction alone
        assert!(p.velocity.x > 0.0);
    }

    #[test]
    fn test_wrap_negative_side() {
        let mut field = field();
        field.spawn(1);

        let b = AmbientConfig::default().bounds;
        field.particles_mut()[0].position = Vec3::new(0.0, -b.y - 2.0, 0.0);
        field.update(FRAME, 0.0);

        assert_eq!(field.particles()[0].position.y, b.y);
    }

    #[test]
    fn test_opacity_bounds_while_pulsing() {
        let mut field = field();
        field.spawn(50);

        let mut time = 0.0;
        for _ in 0..300 {
            time += FRAME;
            field.update(FRAME, time);
            for p in field.particles() {
                assert!(p.opacity >= 0.0 && p.opacity <= 1.0);
            }
        }
    }

    #[test]
    fn test_particles_actually_drift() {
        let mut field = field();
        field.spawn(20);

        let before: Vec<Vec3> = field.particles().iter().map(|p| p.position).collect();
        let mut time = 0.0;
        for _ in 0..120 {
            time += FRAME;
            field.update(FRAME, time);
        }

        let moved = field
            .particles()
            .iter()
            .zip(&before)
            .filter(|(p, start)| p.position.distance(start) > 0.001)
            .count();
        assert!(moved > 10, "only {} of 20 particles moved", moved);
    }

    #[test]
    fn test_noise_range() {
        for i in 0..100 {
            let x = i as f32 * 0.1;
            let y = i as f32 * 0.07;
            let n = simplex_noise(x, y);
            assert!(n >= -1.0 && n <= 1.0);
        }
    }

    #[test]
    fn test_noise_range_negative_coordinates() {
        for i in 0..200 {
            let x = -10.0 + i as f32 * 0.1;
            let y = -7.0 + i as f32 * 0.07;
            let n = simplex_noise(x, y);
            assert!(n >= -1.0 && n <= 1.0, "noise({}, {}) = {}", x, y, n);
        }
    }

    #[test]
    fn test_data_layout() {
        let mut field = field();
        field.spawn(7);
        assert_eq!(field.data().len(), 7 * 8);
    }

    #[test]
    fn test_clear() {
        let mut field = field();
        field.spawn(30);
        field.clear();
        assert_eq!(field.count(), 0);
        assert!(field.data().is_empty());
    }
}
