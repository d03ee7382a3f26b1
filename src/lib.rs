use wasm_bindgen::prelude::*;
use js_sys::Function;

pub mod ambient;
pub mod being;
pub mod config;
pub mod engine;
pub mod math;
pub mod sampler;

pub use being::LifecycleState;
pub use config::{BeingOverrides, EngineOptions};
pub use engine::{BeingHandle, Engine};

use math::Vec3;
use sampler::ShapeSource;

/// Initialize panic hook for better error messages
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Geometry source handed over from JavaScript: a flat xyz vertex buffer
/// plus an optional visibility callback. The engine invokes the callback
/// with `false` when the being takes over and `true` on disposal.
struct JsShapeSource {
    positions: Vec<f32>,
    on_visibility: Option<Function>,
}

impl ShapeSource for JsShapeSource {
    fn vertex_positions(&self) -> Option<&[f32]> {
        if self.positions.is_empty() {
            None
        } else {
            Some(&self.positions)
        }
    }

    fn set_visible(&mut self, visible: bool) {
        if let Some(callback) = &self.on_visibility {
            let _ = callback.call1(&JsValue::NULL, &JsValue::from_bool(visible));
        }
    }
}

/// Particle-being engine exposed to JavaScript.
///
/// The host owns the render loop: it calls `update(dt)` once per frame and
/// draws the flat buffers returned by `particle_data` / `ambient_data`
/// (8 floats per particle: position, size, alpha, rgb).
#[wasm_bindgen]
pub struct ParticleBeings {
    engine: Engine,
}

#[wasm_bindgen]
impl ParticleBeings {
    /// Create an engine, optionally from a YAML options string
    #[wasm_bindgen(constructor)]
    pub fn new(options_yaml: Option<String>) -> Result<ParticleBeings, JsValue> {
        let options = match options_yaml {
            Some(yaml) => EngineOptions::from_yaml(&yaml).map_err(|e| JsValue::from_str(&e))?,
            None => EngineOptions::default(),
        };
        Ok(Self {
            engine: Engine::new(options),
        })
    }

    /// Convert a mesh into a being and return its handle.
    ///
    /// `vertices` is a flat xyz buffer; passing none (or an empty buffer)
    /// selects the procedural body generator. `overrides_yaml` merges over
    /// the engine defaults for this being only.
    pub fn convert(
        &mut self,
        vertices: Option<Box<[f32]>>,
        anchor_x: f32,
        anchor_y: f32,
        anchor_z: f32,
        overrides_yaml: Option<String>,
        on_visibility: Option<Function>,
    ) -> Result<u32, JsValue> {
        let overrides = match overrides_yaml {
            Some(yaml) => {
                Some(BeingOverrides::from_yaml(&yaml).map_err(|e| JsValue::from_str(&e))?)
            }
            None => None,
        };

        let source: Option<Box<dyn ShapeSource>> = match (vertices, on_visibility) {
            (None, None) => None,
            (vertices, on_visibility) => Some(Box::new(JsShapeSource {
                positions: vertices.map(|v| v.into_vec()).unwrap_or_default(),
                on_visibility,
            })),
        };

        let anchor = Vec3::new(anchor_x, anchor_y, anchor_z);
        let handle = self.engine.convert(source, anchor, overrides.as_ref());

        if let Some(being) = self.engine.being(handle) {
            web_sys::console::log_1(&JsValue::from_str(&format!(
                "particle-beings: converted being #{} ({} particles)",
                handle.id(),
                being.particle_count()
            )));
        }

        Ok(handle.id())
    }

    /// Spawn ambient particles; omit `count` to use the configured default
    pub fn create_ambient_particles(&mut self, count: Option<u32>) {
        self.engine.create_ambient_particles(count.map(|c| c as usize));
    }

    /// Advance the simulation by `dt` seconds
    pub fn update(&mut self, dt: f32) {
        self.engine.update(dt);
    }

    /// Push nearby particles toward a world-space point (pointer interaction)
    pub fn apply_external_force(&mut self, x: f32, y: f32, z: f32, strength: f32) {
        self.engine
            .apply_external_force(Vec3::new(x, y, z), strength);
    }

    /// Flat render buffer for one being; empty for disposed/unknown handles
    pub fn particle_data(&self, handle: u32) -> Vec<f32> {
        self.engine
            .particle_data(BeingHandle::from_id(handle))
            .unwrap_or_default()
    }

    /// Flat render buffer for the ambient field
    pub fn ambient_data(&self) -> Vec<f32> {
        self.engine.ambient_data()
    }

    /// Current lifecycle state name, e.g. "Forming"
    pub fn being_state(&self, handle: u32) -> Option<String> {
        self.engine
            .being(BeingHandle::from_id(handle))
            .map(|b| b.state().name().to_string())
    }

    pub fn being_count(&self) -> u32 {
        self.engine.being_count() as u32
    }

    /// Dispose one being, restoring its source's visibility
    pub fn dispose_being(&mut self, handle: u32) -> bool {
        let disposed = self.engine.dispose_being(BeingHandle::from_id(handle));
        if disposed {
            web_sys::console::log_1(&JsValue::from_str(&format!(
                "particle-beings: disposed being #{}",
                handle
            )));
        }
        disposed
    }

    /// Release everything; safe to call more than once
    pub fn dispose(&mut self) {
        self.engine.dispose();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_js_source_empty_buffer_reads_as_missing() {
        let source = JsShapeSource {
            positions: vec![],
            on_visibility: None,
        };
        assert!(source.vertex_positions().is_none());
    }

    #[test]
    fn test_js_source_exposes_buffer() {
        let source = JsShapeSource {
            positions: vec![1.0, 2.0, 3.0],
            on_visibility: None,
        };
        assert_eq!(source.vertex_positions().unwrap().len(), 3);
    }
}
