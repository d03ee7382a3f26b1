//! Engine configuration
//!
//! Options arrive from the host as a YAML string (or are defaulted) and are
//! merged with optional per-being overrides at `convert` time. The tuned
//! force/radius constants live here rather than in the simulation code so
//! deployments can adjust them without touching the integrator.

use serde::Deserialize;

use crate::math::Vec3;
use crate::sampler::BodyType;

/// HSL color range particles draw their tint from
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ColorRange {
    pub h: f32,
    pub s: f32,
    pub l_min: f32,
    pub l_max: f32,
}

impl Default for ColorRange {
    fn default() -> Self {
        Self {
            h: 0.55,
            s: 0.7,
            l_min: 0.45,
            l_max: 0.75,
        }
    }
}

/// Nominal duration of each lifecycle state, in seconds
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StateTimings {
    pub forming: f32,
    pub stable: f32,
    pub dissolving: f32,
    pub scattered: f32,
}

impl Default for StateTimings {
    fn default() -> Self {
        Self {
            forming: 3.0,
            stable: 5.0,
            dissolving: 3.0,
            scattered: 4.0,
        }
    }
}

/// Per-state attraction coefficient toward the current target
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AttractionForces {
    pub forming: f32,
    pub stable: f32,
    pub dissolving: f32,
    pub scattered: f32,
}

impl Default for AttractionForces {
    fn default() -> Self {
        Self {
            forming: 0.02,
            stable: 0.025,
            dissolving: 0.01,
            scattered: 0.006,
        }
    }
}

/// Ambient field tuning
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AmbientConfig {
    /// Half-extents of the toroidal bounding box, centered on the origin
    pub bounds: Vec3,
    pub damping: f32,
    pub drift_strength: f32,
    pub base_opacity: f32,
    pub pulse_amplitude: f32,
    pub pulse_frequency: f32,
    pub spatial_frequency: f32,
    pub particle_size: f32,
}

impl Default for AmbientConfig {
    fn default() -> Self {
        Self {
            bounds: Vec3::new(8.0, 5.0, 8.0),
            damping: 0.96,
            drift_strength: 0.01,
            base_opacity: 0.5,
            pulse_amplitude: 0.4,
            pulse_frequency: 1.5,
            spatial_frequency: 0.3,
            particle_size: 4.0,
        }
    }
}

/// Engine-wide options, recognized as YAML from the host
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EngineOptions {
    pub particle_count: usize,
    pub particle_size: f32,
    pub ambient_particle_count: usize,
    pub speed_multiplier: f32,
    pub color_range: ColorRange,
    pub state_timings: StateTimings,
    pub attraction_forces: AttractionForces,
    pub turbulence_strength: f32,
    pub oscillation_speed: f32,
    pub body_type: BodyType,
    pub damping: f32,
    /// Cap on the distance term of the attraction force
    pub force_cap: f32,
    /// Containment radius around the being anchor
    pub max_radius: f32,
    pub containment_strength: f32,
    /// Half-extent of the box scattered targets are drawn from
    pub scatter_radius: f32,
    /// Amplitude of the per-particle wander while scattered
    pub wander_radius: f32,
    pub opacity_smoothing: f32,
    pub bob_amplitude: f32,
    /// Upper bound of the random jitter added to each state duration
    pub state_jitter_max: f32,
    pub influence_radius: f32,
    pub base_force_unit: f32,
    pub ambient: AmbientConfig,
    pub seed: u32,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            particle_count: 500,
            particle_size: 6.0,
            ambient_particle_count: 150,
            speed_multiplier: 1.0,
            color_range: ColorRange::default(),
            state_timings: StateTimings::default(),
            attraction_forces: AttractionForces::default(),
            turbulence_strength: 0.002,
            oscillation_speed: 0.05,
            body_type: BodyType::Adult,
            damping: 0.95,
            force_cap: 0.5,
            max_radius: 8.0,
            containment_strength: 0.02,
            scatter_radius: 5.0,
            wander_radius: 0.8,
            opacity_smoothing: 0.05,
            bob_amplitude: 0.003,
            state_jitter_max: 2.0,
            influence_radius: 2.0,
            base_force_unit: 0.05,
            ambient: AmbientConfig::default(),
            seed: 42,
        }
    }
}

impl EngineOptions {
    /// Parse from a YAML string; unknown keys are ignored, missing keys default
    pub fn from_yaml(yaml: &str) -> Result<Self, String> {
        serde_yaml::from_str(yaml).map_err(|e| format!("options parse error: {}", e))
    }

    /// The per-being configuration implied by these defaults
    pub fn being_config(&self) -> BeingConfig {
        BeingConfig {
            particle_count: self.particle_count,
            particle_size: self.particle_size,
            speed_multiplier: self.speed_multiplier,
            color_range: self.color_range,
            state_timings: self.state_timings,
            attraction_forces: self.attraction_forces,
            turbulence_strength: self.turbulence_strength,
            oscillation_speed: self.oscillation_speed,
            body_type: self.body_type,
            damping: self.damping,
            force_cap: self.force_cap,
            max_radius: self.max_radius,
            containment_strength: self.containment_strength,
            scatter_radius: self.scatter_radius,
            wander_radius: self.wander_radius,
            opacity_smoothing: self.opacity_smoothing,
            bob_amplitude: self.bob_amplitude,
            state_jitter_max: self.state_jitter_max,
        }
    }
}

/// Resolved per-being configuration, fixed for the being's lifetime
#[derive(Debug, Clone, Copy)]
pub struct BeingConfig {
    pub particle_count: usize,
    pub particle_size: f32,
    pub speed_multiplier: f32,
    pub color_range: ColorRange,
    pub state_timings: StateTimings,
    pub attraction_forces: AttractionForces,
    pub turbulence_strength: f32,
    pub oscillation_speed: f32,
    pub body_type: BodyType,
    pub damping: f32,
    pub force_cap: f32,
    pub max_radius: f32,
    pub containment_strength: f32,
    pub scatter_radius: f32,
    pub wander_radius: f32,
    pub opacity_smoothing: f32,
    pub bob_amplitude: f32,
    pub state_jitter_max: f32,
}

/// Per-being overrides merged over the engine defaults at `convert` time
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BeingOverrides {
    pub particle_count: Option<usize>,
    pub particle_size: Option<f32>,
    pub speed_multiplier: Option<f32>,
    pub color_range: Option<ColorRange>,
    pub state_timings: Option<StateTimings>,
    pub attraction_forces: Option<AttractionForces>,
    pub turbulence_strength: Option<f32>,
    pub oscillation_speed: Option<f32>,
    pub body_type: Option<BodyType>,
    pub scatter_radius: Option<f32>,
    pub state_jitter_max: Option<f32>,
}

impl BeingOverrides {
    pub fn from_yaml(yaml: &str) -> Result<Self, String> {
        serde_yaml::from_str(yaml).map_err(|e| format!("overrides parse error: {}", e))
    }

    /// Apply these overrides on top of a base configuration
    pub fn apply(&self, base: BeingConfig) -> BeingConfig {
        let mut cfg = base;
        if let Some(v) = self.particle_count {
            cfg.particle_count = v;
        }
        if let Some(v) = self.particle_size {
            cfg.particle_size = v;
        }
        if let Some(v) = self.speed_multiplier {
            cfg.speed_multiplier = v;
        }
        if let Some(v) = self.color_range {
            cfg.color_range = v;
        }
        if let Some(v) = self.state_timings {
            cfg.state_timings = v;
        }
        if let Some(v) = self.attraction_forces {
            cfg.attraction_forces = v;
        }
        if let Some(v) = self.turbulence_strength {
            cfg.turbulence_strength = v;
        }
        if let Some(v) = self.oscillation_speed {
            cfg.oscillation_speed = v;
        }
        if let Some(v) = self.body_type {
            cfg.body_type = v;
        }
        if let Some(v) = self.scatter_radius {
            cfg.scatter_radius = v;
        }
        if let Some(v) = self.state_jitter_max {
            cfg.state_jitter_max = v;
        }
        cfg
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let opts = EngineOptions::default();
        assert_eq!(opts.particle_count, 500);
        assert!(opts.damping < 1.0);
        assert!(opts.state_timings.forming > 0.0);
    }

    #[test]
    fn test_options_from_yaml() {
        let yaml = r#"
particleCount: 64
speedMultiplier: 2.0
colorRange:
  h: 0.1
  s: 0.5
  lMin: 0.2
  lMax: 0.9
stateTimings:
  forming: 1.0
  stable: 2.0
  dissolving: 1.5
  scattered: 2.5
"#;
        let opts = EngineOptions::from_yaml(yaml).unwrap();
        assert_eq!(opts.particle_count, 64);
        assert!((opts.speed_multiplier - 2.0).abs() < 0.001);
        assert!((opts.color_range.h - 0.1).abs() < 0.001);
        assert!((opts.state_timings.stable - 2.0).abs() < 0.001);
        // Unspecified keys keep their defaults
        assert!((opts.damping - 0.95).abs() < 0.001);
    }

    #[test]
    fn test_options_bad_yaml() {
        assert!(EngineOptions::from_yaml("particleCount: [nope").is_err());
    }

    #[test]
    fn test_override_merge() {
        let base = EngineOptions::default().being_config();
        let overrides = BeingOverrides {
            particle_count: Some(64),
            turbulence_strength: Some(0.01),
            ..Default::default()
        };
        let cfg = overrides.apply(base);

        assert_eq!(cfg.particle_count, 64);
        assert!((cfg.turbulence_strength - 0.01).abs() < 0.0001);
        // Untouched fields come from the base
        assert!((cfg.damping - base.damping).abs() < 0.0001);
    }

    #[test]
    fn test_overrides_from_yaml() {
        let overrides = BeingOverrides::from_yaml("particleCount: 32\nbodyType: child\n").unwrap();
        assert_eq!(overrides.particle_count, Some(32));
        assert_eq!(overrides.body_type, Some(BodyType::Child));
    }
}
