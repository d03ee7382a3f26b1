//! Being lifecycle states and per-state particle policy
//!
//! The state machine is a fixed forward-only cycle; what each state means for
//! a particle is expressed as a pure function from state to a target position
//! and a target opacity, so the policy is testable without running a being.

use crate::config::{AttractionForces, BeingConfig, StateTimings};
use crate::math::Vec3;

/// The four lifecycle states, advancing forward only and wrapping
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
    Forming,
    Stable,
    Dissolving,
    Scattered,
}

impl LifecycleState {
    pub fn next(self) -> Self {
        match self {
            LifecycleState::Forming => LifecycleState::Stable,
            LifecycleState::Stable => LifecycleState::Dissolving,
            LifecycleState::Dissolving => LifecycleState::Scattered,
            LifecycleState::Scattered => LifecycleState::Forming,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            LifecycleState::Forming => "Forming",
            LifecycleState::Stable => "Stable",
            LifecycleState::Dissolving => "Dissolving",
            LifecycleState::Scattered => "Scattered",
        }
    }

    pub fn duration(&self, timings: &StateTimings) -> f32 {
        match self {
            LifecycleState::Forming => timings.forming,
            LifecycleState::Stable => timings.stable,
            LifecycleState::Dissolving => timings.dissolving,
            LifecycleState::Scattered => timings.scattered,
        }
    }

    pub fn attraction(&self, forces: &AttractionForces) -> f32 {
        match self {
            LifecycleState::Forming => forces.forming,
            LifecycleState::Stable => forces.stable,
            LifecycleState::Dissolving => forces.dissolving,
            LifecycleState::Scattered => forces.scattered,
        }
    }
}

/// Inputs the per-state policy needs beyond the particle itself
#[derive(Debug, Clone, Copy)]
pub struct PolicyContext {
    pub anchor: Vec3,
    /// Monotonic per-being phase driving breathing and wander
    pub phase: f32,
    /// Seconds since the current state was entered
    pub state_timer: f32,
}

/// Where a particle should head and how opaque it should become, given the
/// being's current state
pub fn particle_policy(
    state: LifecycleState,
    formed_target: Vec3,
    scattered_target: Vec3,
    base_opacity: f32,
    index: usize,
    ctx: &PolicyContext,
    config: &BeingConfig,
) -> (Vec3, f32) {
    match state {
        LifecycleState::Forming => (formed_target, base_opacity),
        LifecycleState::Stable => {
            // Uniform breathing: the silhouette offset from the anchor
            // expands and contracts by up to 10%
            let breathing = (ctx.phase * 2.0).sin() * 0.1;
            let offset = formed_target - ctx.anchor;
            (ctx.anchor + offset.scale(1.0 + breathing), base_opacity)
        }
        LifecycleState::Dissolving => {
            let nominal = config.state_timings.dissolving.max(f32::EPSILON);
            let progress = (ctx.state_timer / nominal).clamp(0.0, 1.0);
            (
                formed_target.lerp(&scattered_target, progress),
                base_opacity * (1.0 - progress),
            )
        }
        LifecycleState::Scattered => (
            scattered_target + wander(ctx.phase, index).scale(config.wander_radius),
            base_opacity * 0.3,
        ),
    }
}

/// Per-particle orbit around the scattered anchor, keyed by index so no two
/// particles follow the same path
fn wander(phase: f32, index: usize) -> Vec3 {
    let i = index as f32;
    Vec3::new(
        (phase * 0.7 + i * 0.5).sin(),
        (phase * 0.5 + i * 0.3).cos(),
        (phase * 0.6 + i * 0.7).sin(),
    )
}
