mod config;
mod state;

pub use config::{LateralBounds, LongitudinalBounds, TrimSolverConfig};
pub use state::{
    LateralResiduals, LateralTrimState, LongitudinalResiduals, LongitudinalTrimState,
    TrimCondition, TrimResiduals, TrimState, TrimTarget,
};
