use phugoid::prelude::*;

fn main() -> phugoid::utils::Result<()> {
    let atmosphere = Atmosphere::standard();
    let solver = TrimSolver::default();
    let linearizer = Linearizer::default();
    let analyzer = ModeAnalyzer::default();

    for (aircraft, target) in [
        (AircraftConfig::cessna_172(), TrimTarget::new(51.44, 1524.0)),
        (AircraftConfig::twin_otter(), TrimTarget::new(70.0, 2000.0)),
    ] {
        let trim = solver.find_trim(&aircraft, &atmosphere, &target)?;
        let model = linearizer.linearize(&aircraft, &atmosphere, &trim)?;
        let modes = analyzer.analyze(&model)?;

        println!(
            "{} at {:.1} m/s, {:.0} m",
            aircraft.name, target.airspeed, target.altitude
        );
        println!(
            "  trim: alpha {:.2} deg, elevator {:.2} deg, throttle {:.3} ({} iterations)",
            rad_to_deg(trim.alpha()),
            rad_to_deg(trim.controls().elevator()),
            trim.controls().throttle(),
            trim.iterations()
        );

        for subsystem in Subsystem::ALL {
            println!("  {subsystem}:");
            for mode in modes.modes(subsystem) {
                let response = match mode.response() {
                    ModeResponse::DampedOscillation { period, time_to_half } => {
                        format!("period {period:.2} s, half amplitude in {time_to_half:.2} s")
                    }
                    ModeResponse::DivergentOscillation {
                        period,
                        time_to_double,
                    } => format!("period {period:.2} s, doubles in {time_to_double:.2} s"),
                    ModeResponse::Subsidence { time_constant, .. } => {
                        format!("time constant {time_constant:.2} s")
                    }
                    ModeResponse::Divergence { time_to_double } => {
                        format!("doubles in {time_to_double:.2} s")
                    }
                    ModeResponse::Neutral => "neutral".to_string(),
                };
                println!(
                    "    {:<16} {:>9.4} {:+9.4}i  wn {:7.4}  zeta {:7.4}  {}",
                    mode.kind.name(),
                    mode.real(),
                    mode.imag(),
                    mode.natural_frequency,
                    mode.damping_ratio,
                    response
                );
            }
        }
        println!("  stable: {}\n", modes.is_stable());
    }

    // Root locus of the Cessna across its cruise envelope.
    let aircraft = AircraftConfig::cessna_172();
    let airspeeds: Vec<f64> = (0..=12).map(|k| 40.0 + 2.5 * k as f64).collect();
    let points = root_locus_sweep(
        &aircraft,
        &atmosphere,
        1524.0,
        &airspeeds,
        &solver,
        &linearizer,
        &analyzer,
    );

    println!("airspeed  phugoid wn  short period wn  dutch roll zeta");
    for point in &points {
        match &point.result {
            Ok(analysis) => {
                let wn = |kind| {
                    analysis
                        .modes
                        .find(kind)
                        .map_or(f64::NAN, |mode: &Eigenmode| mode.natural_frequency)
                };
                let zeta = analysis
                    .modes
                    .find(ModeKind::DutchRoll)
                    .map_or(f64::NAN, |mode| mode.damping_ratio);
                println!(
                    "{:8.1}  {:10.4}  {:15.4}  {:15.4}",
                    point.airspeed,
                    wn(ModeKind::Phugoid),
                    wn(ModeKind::ShortPeriod),
                    zeta
                );
            }
            Err(err) => println!("{:8.1}  {err}", point.airspeed),
        }
    }

    Ok(())
}
