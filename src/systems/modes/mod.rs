mod analyzer;

pub use analyzer::{eigenvalues, ModeAnalyzer};
