//! Engine: owns every being and the ambient field, advances the shared
//! clock, and mediates the visibility handoff with the host renderer.
//!
//! Beings live in an arena indexed by opaque handles; a disposed slot stays
//! empty so stale handles resolve to nothing instead of dangling.

use crate::ambient::AmbientField;
use crate::being::Being;
use crate::config::{BeingOverrides, EngineOptions};
use crate::math::{Lcg, Vec3};
use crate::sampler::{self, ShapeSource};

/// Opaque identifier of a being registered with the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BeingHandle(u32);

impl BeingHandle {
    pub fn id(&self) -> u32 {
        self.0
    }

    pub fn from_id(id: u32) -> Self {
        Self(id)
    }
}

struct BeingSlot {
    being: Being,
    /// Source shape hidden while the being is live; visibility is restored
    /// when the slot is disposed
    source: Option<Box<dyn ShapeSource>>,
}

/// The particle-swarm engine. Single-threaded and frame-driven: the host
/// render loop owns timing and calls `update(dt)` once per frame.
pub struct Engine {
    options: EngineOptions,
    beings: Vec<Option<BeingSlot>>,
    ambient: AmbientField,
    clock: f32,
}

impl Engine {
    pub fn new(options: EngineOptions) -> Self {
        let ambient = AmbientField::new(options.ambient, options.seed.wrapping_add(1));
        Self {
            options,
            beings: Vec::new(),
            ambient,
            clock: 0.0,
        }
    }

    pub fn options(&self) -> &EngineOptions {
        &self.options
    }

    pub fn clock(&self) -> f32 {
        self.clock
    }

    /// Convert a shape into a being. A missing or empty source falls back to
    /// the procedural body generator; a supplied source is hidden until the
    /// being is disposed.
    pub fn convert(
        &mut self,
        mut source: Option<Box<dyn ShapeSource>>,
        anchor: Vec3,
        overrides: Option<&BeingOverrides>,
    ) -> BeingHandle {
        let config = match overrides {
            Some(o) => o.apply(self.options.being_config()),
            None => self.options.being_config(),
        };

        // Each being gets its own reproducible random stream
        let seed = self
            .options
            .seed
            .wrapping_add((self.beings.len() as u32).wrapping_mul(0x9E37_79B9));
        let mut rng = Lcg::new(seed);

        let points = sampler::sample(
            source.as_deref(),
            config.particle_count,
            config.body_type,
            &mut rng,
        );
        let being = Being::new(points, anchor, config, rng);

        if let Some(src) = source.as_mut() {
            src.set_visible(false);
        }

        let handle = BeingHandle(self.beings.len() as u32);
        self.beings.push(Some(BeingSlot { being, source }));
        handle
    }

    /// Spawn ambient particles; `None` uses the configured default count
    pub fn create_ambient_particles(&mut self, count: Option<usize>) {
        let count = count.unwrap_or(self.options.ambient_particle_count);
        self.ambient.spawn(count);
    }

    /// Advance the simulation by one frame. Safe with `dt = 0` and with
    /// nothing registered; also a no-op after `dispose()` since every
    /// collection is empty then.
    pub fn update(&mut self, dt: f32) {
        if dt <= 0.0 {
            return;
        }
        self.clock += dt;

        for slot in self.beings.iter_mut().flatten() {
            slot.being.update(dt, self.clock);
        }
        self.ambient.update(dt, self.clock);
    }

    /// Push every particle within the influence radius toward `point`
    pub fn apply_external_force(&mut self, point: Vec3, strength: f32) {
        let radius = self.options.influence_radius;
        let base = self.options.base_force_unit;
        for slot in self.beings.iter_mut().flatten() {
            slot.being
                .apply_external_force(point, strength, radius, base);
        }
    }

    pub fn being(&self, handle: BeingHandle) -> Option<&Being> {
        self.beings
            .get(handle.0 as usize)
            .and_then(|slot| slot.as_ref())
            .map(|slot| &slot.being)
    }

    /// Number of live beings
    pub fn being_count(&self) -> usize {
        self.beings.iter().flatten().count()
    }

    pub fn ambient_count(&self) -> usize {
        self.ambient.count()
    }

    /// Flat render buffer for one being, `None` for disposed/unknown handles
    pub fn particle_data(&self, handle: BeingHandle) -> Option<Vec<f32>> {
        self.being(handle).map(|b| b.particle_data())
    }

    pub fn ambient_data(&self) -> Vec<f32> {
        self.ambient.data()
    }

    /// Dispose one being, restoring its source's visibility.
    /// Returns false if the handle was already disposed or unknown.
    pub fn dispose_being(&mut self, handle: BeingHandle) -> bool {
        let slot = match self.beings.get_mut(handle.0 as usize) {
            Some(slot) => slot.take(),
            None => None,
        };
        match slot {
            Some(mut slot) => {
                if let Some(src) = slot.source.as_mut() {
                    src.set_visible(true);
                }
                true
            }
            None => false,
        }
    }

    /// Release every being and ambient particle and restore all source
    /// visibility. Idempotent. Emptied slots stay tombstoned so handles
    /// issued before disposal never alias beings converted afterward.
    pub fn dispose(&mut self) {
        for slot in &mut self.beings {
            if let Some(mut slot) = slot.take() {
                if let Some(src) = slot.source.as_mut() {
                    src.set_visible(true);
                }
            }
        }
        self.ambient.clear();
    }
}
