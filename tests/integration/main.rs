#[path = "../common/mod.rs"]
mod common;

mod analysis_tests;
