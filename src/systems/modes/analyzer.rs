use nalgebra::{Complex, Matrix4, Vector4};
use std::cmp::Ordering;
use tracing::debug;

use crate::components::linear::{LinearSubsystem, StateSpaceModel, Subsystem};
use crate::components::modes::{Eigenmode, ModalAnalysis, ModeClassifierConfig, ModeKind};
use crate::utils::{FlightDynamicsError, Result};

const SCHUR_MAX_ITERATIONS: usize = 10_000;

/// Eigen-decomposition and labelling of the linear subsystems.
#[derive(Debug, Clone, Default)]
pub struct ModeAnalyzer {
    config: ModeClassifierConfig,
}

impl ModeAnalyzer {
    pub fn new(config: ModeClassifierConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ModeClassifierConfig {
        &self.config
    }

    pub fn analyze(&self, model: &StateSpaceModel) -> Result<ModalAnalysis> {
        Ok(ModalAnalysis {
            longitudinal: self.analyze_subsystem(&model.longitudinal())?,
            lateral: self.analyze_subsystem(&model.lateral())?,
        })
    }

    /// Modes of one subsystem, fastest first.
    pub fn analyze_subsystem(&self, subsystem: &LinearSubsystem) -> Result<Vec<Eigenmode>> {
        self.config.validate()?;
        let roots = self.roots(&subsystem.a)?;
        let kinds = self.classify(subsystem.kind, &roots);

        let mut modes = roots
            .into_iter()
            .zip(kinds)
            .map(|(root, kind)| {
                let shape = self.mode_shape(&subsystem.a, root)?;
                Ok(Eigenmode::new(
                    kind,
                    subsystem.kind,
                    root,
                    shape,
                    self.config.stability_margin,
                ))
            })
            .collect::<Result<Vec<_>>>()?;
        modes.sort_by(|a, b| descending(a.natural_frequency, b.natural_frequency));

        for mode in &modes {
            debug!(
                subsystem = %subsystem.kind,
                mode = %mode.kind,
                re = mode.real(),
                im = mode.imag(),
                wn = mode.natural_frequency,
                zeta = mode.damping_ratio,
                "mode"
            );
        }
        Ok(modes)
    }

    /// Eigenvalues with each conjugate pair kept once (Im > 0) and near-real
    /// roots snapped onto the real axis.
    fn roots(&self, a: &Matrix4<f64>) -> Result<Vec<Complex<f64>>> {
        let eigenvalues = eigenvalues(a).ok_or_else(|| {
            FlightDynamicsError::Linearization("eigenvalues could not be computed".to_string())
        })?;

        Ok(eigenvalues
            .iter()
            .filter_map(|l| {
                let tolerance = self.config.complex_tolerance * l.norm().max(1.0);
                if l.im.abs() <= tolerance {
                    Some(Complex::new(l.re, 0.0))
                } else if l.im > 0.0 {
                    Some(*l)
                } else {
                    None
                }
            })
            .collect())
    }

    /// Labels roots in the order given.
    fn classify(&self, subsystem: Subsystem, roots: &[Complex<f64>]) -> Vec<ModeKind> {
        let pairs = ranked(roots, |l| l.im != 0.0);
        let reals = ranked(roots, |l| l.im == 0.0);
        let mut kinds = vec![ModeKind::Phugoid; roots.len()];

        match subsystem {
            Subsystem::Longitudinal => {
                let threshold = self.config.short_period_min_frequency;
                if pairs.len() == 2 {
                    kinds[pairs[0]] = ModeKind::ShortPeriod;
                    kinds[pairs[1]] = ModeKind::Phugoid;
                } else {
                    for &i in &pairs {
                        kinds[i] = by_frequency(roots[i], threshold);
                    }
                }
                for &i in &reals {
                    kinds[i] = by_frequency(roots[i], threshold);
                }
            }
            Subsystem::Lateral => {
                for (rank, &i) in pairs.iter().enumerate() {
                    kinds[i] = if rank == 0 {
                        ModeKind::DutchRoll
                    } else {
                        ModeKind::LateralPhugoid
                    };
                }
                let last = reals.len().saturating_sub(1);
                for (rank, &i) in reals.iter().enumerate() {
                    kinds[i] = match rank {
                        0 if reals.len() == 1 => {
                            if roots[i].norm() >= self.config.short_period_min_frequency {
                                ModeKind::Roll
                            } else {
                                ModeKind::Spiral
                            }
                        }
                        0 => ModeKind::Roll,
                        r if r == last => ModeKind::Spiral,
                        _ => ModeKind::DutchRoll,
                    };
                }
            }
        }
        kinds
    }

    /// Eigenvector for `root` by shifted inverse iteration.
    fn mode_shape(&self, a: &Matrix4<f64>, root: Complex<f64>) -> Result<Vector4<Complex<f64>>> {
        let shift = root + Complex::new(self.config.shape_shift * root.norm().max(1.0), 0.0);
        let system = a.map(|v| Complex::new(v, 0.0)) - Matrix4::<Complex<f64>>::identity() * shift;
        let lu = system.lu();

        let mut shape = Vector4::repeat(Complex::new(1.0, 0.0));
        for _ in 0..self.config.shape_iterations {
            shape = lu.solve(&shape).ok_or_else(|| {
                FlightDynamicsError::Linearization(format!(
                    "singular inverse iteration for eigenvalue {root}"
                ))
            })?;
            shape = normalize(shape).ok_or_else(|| {
                FlightDynamicsError::Linearization(format!(
                    "degenerate mode shape for eigenvalue {root}"
                ))
            })?;
        }
        Ok(shape)
    }
}

/// All four eigenvalues, read off the real Schur form.
///
/// `None` for a non-finite matrix or when the QR sweeps do not converge.
pub fn eigenvalues(a: &Matrix4<f64>) -> Option<Vec<Complex<f64>>> {
    if !a.iter().all(|v| v.is_finite()) {
        return None;
    }
    let (_, t) = a.try_schur(f64::EPSILON, SCHUR_MAX_ITERATIONS)?.unpack();

    let n = t.nrows();
    let mut values = Vec::with_capacity(n);
    let mut i = 0;
    while i < n {
        if i + 1 < n && t[(i + 1, i)] != 0.0 {
            // 2×2 block: λ = tr/2 ± √((tr/2)² − det).
            let half_trace = 0.5 * (t[(i, i)] + t[(i + 1, i + 1)]);
            let det = t[(i, i)] * t[(i + 1, i + 1)] - t[(i, i + 1)] * t[(i + 1, i)];
            let discriminant = half_trace * half_trace - det;
            if discriminant < 0.0 {
                let im = (-discriminant).sqrt();
                values.push(Complex::new(half_trace, im));
                values.push(Complex::new(half_trace, -im));
            } else {
                let root = discriminant.sqrt();
                values.push(Complex::new(half_trace + root, 0.0));
                values.push(Complex::new(half_trace - root, 0.0));
            }
            i += 2;
        } else {
            values.push(Complex::new(t[(i, i)], 0.0));
            i += 1;
        }
    }

    values
        .iter()
        .all(|l| l.re.is_finite() && l.im.is_finite())
        .then_some(values)
}

fn descending(a: f64, b: f64) -> Ordering {
    b.total_cmp(&a)
}

/// Indices of the roots matching `filter`, largest |λ| first.
fn ranked(roots: &[Complex<f64>], filter: impl Fn(&Complex<f64>) -> bool) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..roots.len()).filter(|&i| filter(&roots[i])).collect();
    indices.sort_by(|&a, &b| descending(roots[a].norm(), roots[b].norm()));
    indices
}

fn by_frequency(root: Complex<f64>, threshold: f64) -> ModeKind {
    if root.norm() >= threshold {
        ModeKind::ShortPeriod
    } else {
        ModeKind::Phugoid
    }
}

/// Scales `v` so its largest component is exactly 1.
fn normalize(v: Vector4<Complex<f64>>) -> Option<Vector4<Complex<f64>>> {
    let pivot = v
        .iter()
        .copied()
        .max_by(|a, b| a.norm().total_cmp(&b.norm()))?;
    if pivot.norm() > 0.0 && pivot.norm().is_finite() {
        Some(v.map(|c| c / pivot))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::Matrix4x2;
    use pretty_assertions::assert_eq;

    fn subsystem(kind: Subsystem, a: Matrix4<f64>) -> LinearSubsystem {
        LinearSubsystem {
            kind,
            a,
            b: Matrix4x2::zeros(),
            states: kind.states(),
            inputs: kind.inputs(),
        }
    }

    /// A pair at −1 ± 2i plus real roots at −3 and −0.5, lightly mixed.
    fn mixed_matrix() -> Matrix4<f64> {
        #[rustfmt::skip]
        let block = Matrix4::new(
            -1.0,  2.0,  0.0,  0.0,
            -2.0, -1.0,  0.0,  0.0,
             0.0,  0.0, -3.0,  0.0,
             0.0,  0.0,  0.0, -0.5,
        );
        #[rustfmt::skip]
        let t = Matrix4::new(
            1.0, 0.2, 0.0, 0.1,
            0.0, 1.0, 0.3, 0.0,
            0.1, 0.0, 1.0, 0.2,
            0.0, 0.1, 0.0, 1.0,
        );
        let t_inv = t.try_inverse().unwrap();
        t * block * t_inv
    }

    #[test]
    fn test_longitudinal_labels() {
        let modes = ModeAnalyzer::default()
            .analyze_subsystem(&subsystem(Subsystem::Longitudinal, mixed_matrix()))
            .unwrap();

        let kinds: Vec<_> = modes.iter().map(|m| m.kind).collect();
        assert_eq!(
            kinds,
            vec![ModeKind::ShortPeriod, ModeKind::ShortPeriod, ModeKind::Phugoid]
        );
        assert_relative_eq!(modes[0].real(), -3.0, epsilon = 1e-9);
        assert_relative_eq!(modes[1].natural_frequency, 5f64.sqrt(), epsilon = 1e-9);
        assert_relative_eq!(modes[1].imag(), 2.0, epsilon = 1e-9);
        assert_eq!(modes.iter().map(|m| m.multiplicity).sum::<usize>(), 4);
    }

    #[test]
    fn test_lateral_labels() {
        let modes = ModeAnalyzer::default()
            .analyze_subsystem(&subsystem(Subsystem::Lateral, mixed_matrix()))
            .unwrap();

        let kinds: Vec<_> = modes.iter().map(|m| m.kind).collect();
        assert_eq!(
            kinds,
            vec![ModeKind::Roll, ModeKind::DutchRoll, ModeKind::Spiral]
        );
        assert!(modes.iter().all(|m| m.stable));
    }

    #[test]
    fn test_two_pairs_split_by_frequency() {
        #[rustfmt::skip]
        let a = Matrix4::new(
            -2.0,  4.0,  0.0,   0.0,
            -4.0, -2.0,  0.0,   0.0,
             0.0,  0.0, -0.01,  0.2,
             0.0,  0.0, -0.2,  -0.01,
        );
        let modes = ModeAnalyzer::default()
            .analyze_subsystem(&subsystem(Subsystem::Longitudinal, a))
            .unwrap();

        assert_eq!(modes.len(), 2);
        assert_eq!(modes[0].kind, ModeKind::ShortPeriod);
        assert_eq!(modes[1].kind, ModeKind::Phugoid);
        assert_relative_eq!(modes[1].natural_frequency, 0.01f64.hypot(0.2), epsilon = 1e-9);
    }

    #[test]
    fn test_mode_shapes_are_eigenvectors() {
        let a = mixed_matrix();
        let modes = ModeAnalyzer::default()
            .analyze_subsystem(&subsystem(Subsystem::Longitudinal, a))
            .unwrap();
        let a_complex = a.map(|v| Complex::new(v, 0.0));

        for mode in &modes {
            let residual = a_complex * mode.shape - mode.shape * mode.eigenvalue;
            assert!(residual.norm() < 1e-6, "{} residual {}", mode.kind, residual.norm());
            let largest = mode.shape.iter().map(|c| c.norm()).fold(0.0, f64::max);
            assert_relative_eq!(largest, 1.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_unstable_root_flagged() {
        let a = Matrix4::from_diagonal(&Vector4::new(-5.0, 0.358, -0.2, -1.5));
        let modes = ModeAnalyzer::default()
            .analyze_subsystem(&subsystem(Subsystem::Longitudinal, a))
            .unwrap();

        let unstable: Vec<_> = modes.iter().filter(|m| !m.stable).collect();
        assert_eq!(unstable.len(), 1);
        assert_relative_eq!(unstable[0].real(), 0.358, epsilon = 1e-12);
    }

    #[test]
    fn test_non_finite_matrix_rejected() {
        let mut a = Matrix4::identity();
        a[(0, 1)] = f64::NAN;
        let err = ModeAnalyzer::default()
            .analyze_subsystem(&subsystem(Subsystem::Lateral, a))
            .unwrap_err();
        assert_eq!(err.kind(), "linearization");
    }
}
