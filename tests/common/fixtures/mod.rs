mod aircraft;
mod analysis;

pub use aircraft::*;
pub use analysis::*;
