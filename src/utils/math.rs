use nalgebra::{Matrix3, Vector3};
use std::f64::consts::PI;

/// Convert degrees to radians
#[inline]
pub fn deg_to_rad(deg: f64) -> f64 {
    deg * PI / 180.0
}

/// Convert radians to degrees
#[inline]
pub fn rad_to_deg(rad: f64) -> f64 {
    rad * 180.0 / PI
}

/// Calculate the flight path angle from a NED velocity vector
pub fn flight_path_angle(velocity: &Vector3<f64>) -> f64 {
    -velocity
        .z
        .atan2((velocity.x.powi(2) + velocity.y.powi(2)).sqrt())
}

/// Direction cosine matrix taking body-frame vectors into the NED frame.
///
/// Built from the 3-2-1 (yaw, pitch, roll) Euler sequence.
pub fn body_to_ned(phi: f64, theta: f64, psi: f64) -> Matrix3<f64> {
    let (sph, cph) = phi.sin_cos();
    let (sth, cth) = theta.sin_cos();
    let (sps, cps) = psi.sin_cos();

    Matrix3::new(
        cth * cps,
        sph * sth * cps - cph * sps,
        cph * sth * cps + sph * sps,
        cth * sps,
        sph * sth * sps + cph * cps,
        cph * sth * sps - sph * cps,
        -sth,
        sph * cth,
        cph * cth,
    )
}

/// Euler angle rates (φ̇, θ̇, ψ̇) from body rates.
///
/// Singular at θ = ±90°; callers near that attitude get unbounded rates.
pub fn euler_rates(phi: f64, theta: f64, rates: &Vector3<f64>) -> Vector3<f64> {
    let (p, q, r) = (rates.x, rates.y, rates.z);
    let (sph, cph) = phi.sin_cos();
    let along = q * sph + r * cph;

    Vector3::new(
        p + along * theta.tan(),
        q * cph - r * sph,
        along / theta.cos(),
    )
}

/// Index of the largest absolute value in a slice.
pub fn argmax_abs(values: &[f64]) -> Option<usize> {
    values
        .iter()
        .enumerate()
        .filter(|(_, v)| v.is_finite())
        .max_by(|(_, a), (_, b)| a.abs().total_cmp(&b.abs()))
        .map(|(i, _)| i)
}
