use phugoid::components::{AircraftState, Eigenmode, ModalAnalysis, ModeKind, TrimState};

/// Assert every state component is finite
#[track_caller]
pub fn assert_finite_state(state: &AircraftState) {
    assert!(
        state.is_finite(),
        "state contains non-finite values: {:?}",
        state.as_vector()
    );
}

/// Assert the trim residuals are below `tolerance`
#[track_caller]
pub fn assert_trimmed(trim: &TrimState, tolerance: f64) {
    let residual = trim.residuals().max_abs();
    assert!(
        residual < tolerance,
        "trim residual {residual:.3e} exceeds {tolerance:.1e}: {:?}",
        trim.residuals()
    );
    assert_finite_state(trim.state());
}

/// Assert a mode exists with frequency and damping inside the given bands
#[track_caller]
pub fn assert_mode_in_band<'a>(
    modes: &'a ModalAnalysis,
    kind: ModeKind,
    frequency: (f64, f64),
    damping: (f64, f64),
) -> &'a Eigenmode {
    let mode = modes
        .find(kind)
        .unwrap_or_else(|| panic!("no {kind} mode in {modes:#?}"));
    assert!(
        mode.natural_frequency > frequency.0 && mode.natural_frequency < frequency.1,
        "{kind} natural frequency {:.4} outside {frequency:?}",
        mode.natural_frequency
    );
    assert!(
        mode.damping_ratio > damping.0 && mode.damping_ratio < damping.1,
        "{kind} damping ratio {:.4} outside {damping:?}",
        mode.damping_ratio
    );
    mode
}

#[track_caller]
pub fn assert_stable(modes: &ModalAnalysis) {
    let unstable: Vec<_> = modes
        .unstable_modes()
        .map(|m| (m.kind, m.eigenvalue))
        .collect();
    assert!(unstable.is_empty(), "unstable modes: {unstable:?}");
}
