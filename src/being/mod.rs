//! A being: a fixed population of particles cycling through the four-phase
//! lifecycle around a world anchor.

pub mod particle;
pub mod lifecycle;

pub use particle::Particle;
pub use lifecycle::{LifecycleState, PolicyContext};

use crate::config::BeingConfig;
use crate::math::{Lcg, Vec3};

/// Below this distance a direction is treated as degenerate and the force
/// contribution is skipped
const EPSILON: f32 = 1e-5;

/// One particle-swarm entity. The particle count is fixed at creation.
pub struct Being {
    particles: Vec<Particle>,
    state: LifecycleState,
    state_timer: f32,
    /// Random 0..jitter_max seconds added to the current state's duration,
    /// drawn once at each transition
    state_jitter: f32,
    transformation_phase: f32,
    anchor: Vec3,
    config: BeingConfig,
    rng: Lcg,
}

impl Being {
    /// Spawn a being from sampled silhouette points (anchor-relative).
    /// Particles start at random positions in the scatter volume with the
    /// state machine in `Forming`.
    pub fn new(sampled: Vec<Vec3>, anchor: Vec3, config: BeingConfig, mut rng: Lcg) -> Self {
        let particles = sampled
            .into_iter()
            .map(|point| Particle::spawn(point, anchor, &config, &mut rng))
            .collect();
        let state_jitter = rng.next_f32() * config.state_jitter_max;

        Self {
            particles,
            state: LifecycleState::Forming,
            state_timer: 0.0,
            state_jitter,
            transformation_phase: 0.0,
            anchor,
            config,
            rng,
        }
    }

    pub fn state(&self) -> LifecycleState {
        self.state
    }

    pub fn anchor(&self) -> Vec3 {
        self.anchor
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn particle_count(&self) -> usize {
        self.particles.len()
    }

    /// Advance the state machine and integrate every particle for one frame.
    /// `time` is the engine's accumulated clock; turbulence is a pure
    /// function of it and the particle index.
    pub fn update(&mut self, dt: f32, time: f32) {
        self.transformation_phase += self.config.speed_multiplier * dt;
        self.state_timer += dt;

        let nominal = self.state.duration(&self.config.state_timings);
        if self.state_timer > nominal + self.state_jitter {
            self.state = self.state.next();
            self.state_timer = 0.0;
            self.state_jitter = self.rng.next_f32() * self.config.state_jitter_max;
        }

        let config = self.config;
        let attraction = self.state.attraction(&config.attraction_forces);
        let ctx = PolicyContext {
            anchor: self.anchor,
            phase: self.transformation_phase,
            state_timer: self.state_timer,
        };

        for (index, p) in self.particles.iter_mut().enumerate() {
            let (target, target_opacity) = lifecycle::particle_policy(
                self.state,
                p.formed_target,
                p.scattered_target,
                p.base_opacity,
                index,
                &ctx,
                &config,
            );

            // Attraction toward the state's target; the distance term is
            // capped so far-away particles do not get launched
            let to_target = target - p.position;
            let force = to_target.clamp_length(config.force_cap).scale(attraction);
            p.velocity = p.velocity + force;

            // Deterministic turbulence keyed by clock and index
            let i = index as f32;
            let turbulence = Vec3::new(
                (time * 1.1 + i * 0.7).sin(),
                (time * 1.7 + i * 1.3).cos(),
                (time * 1.3 + i * 0.9).sin(),
            )
            .scale(config.turbulence_strength);
            p.velocity = p.velocity + turbulence;

            p.velocity = p.velocity.scale(config.damping);
            p.position = p.position + p.velocity;

            // Cosmetic vertical bob, not fed back into velocity
            p.oscillation_phase += config.oscillation_speed;
            p.position.y += p.oscillation_phase.sin() * config.bob_amplitude;

            // Exponential approach, never instant
            p.opacity += (target_opacity - p.opacity) * config.opacity_smoothing;
            p.opacity = p.opacity.clamp(0.0, 1.0);

            // Soft containment: impulse toward the anchor, scaled by overshoot
            let from_anchor = p.position - self.anchor;
            let anchor_dist = from_anchor.length();
            if anchor_dist > config.max_radius && anchor_dist > EPSILON {
                let pull = from_anchor
                    .scale(-1.0 / anchor_dist)
                    .scale(config.containment_strength * (anchor_dist - config.max_radius));
                p.velocity = p.velocity + pull;
            }
        }
    }

    /// Push particles within `radius` of `point` toward it
    pub fn apply_external_force(
        &mut self,
        point: Vec3,
        strength: f32,
        radius: f32,
        base_force_unit: f32,
    ) {
        for p in &mut self.particles {
            let to_point = point - p.position;
            let dist = to_point.length();
            if dist > EPSILON && dist < radius {
                p.velocity = p.velocity + to_point.scale(base_force_unit * strength / dist);
            }
        }
    }

    /// Flat render buffer: position(3) + size(1) + alpha(1) + color(3)
    pub fn particle_data(&self) -> Vec<f32> {
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
}
