use phugoid::prelude::*;

fn main() -> phugoid::utils::Result<()> {
    let aircraft = AircraftConfig::cessna_172();
    let atmosphere = Atmosphere::standard();

    let trim = TrimSolver::default().find_trim(
        &aircraft,
        &atmosphere,
        &TrimTarget::new(51.44, 1524.0),
    )?;

    // Two degrees of up elevator held for two seconds.
    let pulse = ControlPulse::new(
        *trim.controls(),
        ControlIndex::Elevator,
        deg_to_rad(-2.0),
        5.0,
        7.0,
    )?;

    let integrator = Integrator::new(IntegratorConfig::default().with_output_interval(0.5));
    let trajectory = integrator.integrate(&aircraft, &atmosphere, *trim.state(), pulse, 60.0)?;

    println!("    t (s)    V (m/s)  alpha (deg)  theta (deg)   q (deg/s)   h (m)    elevator (deg)");
    for sample in &trajectory {
        let sample = sample?;
        let state = &sample.state;
        println!(
            "{:9.2} {:10.3} {:12.3} {:12.3} {:11.3} {:9.2} {:14.3}",
            sample.time,
            state.airspeed(),
            rad_to_deg(state.w().atan2(state.u())),
            rad_to_deg(state.theta()),
            rad_to_deg(state.q()),
            state.altitude(),
            rad_to_deg(sample.controls.elevator())
        );
    }

    Ok(())
}
