pub mod config;
pub mod environment;

pub use config::PhysicsConfig;
pub use environment::{Atmosphere, AtmosphereConfig, AtmosphereProperties, AtmosphereType, LruCache};
