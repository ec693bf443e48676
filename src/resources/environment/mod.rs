mod atmosphere;
mod cache;
mod config;

pub use atmosphere::{Atmosphere, AtmosphereProperties};
pub use cache::LruCache;
pub use config::{AtmosphereConfig, AtmosphereType};
