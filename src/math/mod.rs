pub mod vec3;
pub mod rng;
pub mod color;

pub use vec3::Vec3;
pub use rng::Lcg;
pub use color::hsl_to_rgb;
