mod atmosphere;

pub use atmosphere::{AtmosphereConfig, AtmosphereType};
