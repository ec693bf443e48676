#![allow(dead_code)]

mod assertions;
mod fixtures;

pub use assertions::{
    assert_finite_state, assert_mode_in_band, assert_stable, assert_trimmed,
};
pub use fixtures::*;
