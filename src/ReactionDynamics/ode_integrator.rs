//! # ODE Integrator
//!
//! Thin wrapper around the adaptive Dormand-Prince RK5(4) stepper of `ode_solvers`, used to
//! integrate the reaction network `dy/dt = f(t, y)`.
//!
//! ## Output
//!
//! The solution is sampled at `n_samples` evenly spaced times spanning `[t0, t1]` (both ends
//! included) using the dense output of the stepper. The sampled matrix has one row per sample
//! and one column per variable.
//!
//! ## Failures
//!
//! Stepper errors (step size underflow, step budget, stiffness) and non-finite samples are
//! reported as [`SimulationError::IntegrationFailure`]. Failures are not retried.
use super::simulation::SimulationError;
use crate::Kinetics::kinetic_model::KineticModel;
use log::info;
use nalgebra::{DMatrix, DVector};
use ode_solvers::System;
use ode_solvers::dopri5::Dopri5;

impl System<f64, DVector<f64>> for KineticModel {
    fn system(&self, t: f64, y: &DVector<f64>, dy: &mut DVector<f64>) {
        self.rhs(t, y, dy);
    }
}

/// solver tolerances and output sampling
#[derive(Debug, Clone, PartialEq)]
pub struct SolverOptions {
    pub rtol: f64,
    pub atol: f64,
    /// number of evenly spaced output times
    pub n_samples: usize,
}

impl Default for SolverOptions {
    fn default() -> Self {
        Self {
            rtol: 1e-3,
            atol: 1e-6,
            n_samples: 100,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SolverStats {
    pub accepted_steps: usize,
    pub rejected_steps: usize,
    pub rhs_evaluations: usize,
}

/// `n` evenly spaced points from `start` to `end` inclusive
pub fn linspace(start: f64, end: f64, n: usize) -> DVector<f64> {
    match n {
        0 => DVector::zeros(0),
        1 => DVector::from_element(1, start),
        _ => {
            let step = (end - start) / (n - 1) as f64;
            DVector::from_fn(n, |i, _| {
                if i == n - 1 { end } else { start + step * i as f64 }
            })
        }
    }
}

// dense output spacing is shrunk by this factor so accumulated rounding never pushes the last
// sample past the end of the interval
const DENSE_STEP_SHRINK: f64 = 1.0 - 1e-9;

fn all_finite(v: &DVector<f64>) -> bool {
    v.iter().all(|x| x.is_finite())
}

/// Initial value problem solver wrapper: stores the sampled solution after `solve`
#[derive(Debug, Clone, Default)]
pub struct IVPSolver {
    pub options: SolverOptions,
    /// sample times
    pub t_mesh: Option<DVector<f64>>,
    /// solution matrix (samples × variables)
    pub solution: Option<DMatrix<f64>>,
    pub stats: SolverStats,
}

impl IVPSolver {
    pub fn new(options: SolverOptions) -> Self {
        Self {
            options,
            ..Default::default()
        }
    }

    pub fn get_result(&self) -> Option<(&DVector<f64>, &DMatrix<f64>)> {
        match (&self.t_mesh, &self.solution) {
            (Some(t), Some(y)) => Some((t, y)),
            _ => None,
        }
    }

    fn check_options(&self) -> Result<(), SimulationError> {
        let o = &self.options;
        if !(o.rtol.is_finite() && o.rtol > 0.0 && o.atol.is_finite() && o.atol > 0.0) {
            return Err(SimulationError::InvalidOptions(
                "rtol and atol must be finite and positive".to_string(),
            ));
        }
        if o.n_samples == 0 {
            return Err(SimulationError::InvalidOptions(
                "n_samples must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// integrates `system` from `y0` over `time_span` and stores the sampled solution
    pub fn solve<F: System<f64, DVector<f64>>>(
        &mut self,
        system: F,
        y0: &DVector<f64>,
        time_span: (f64, f64),
    ) -> Result<(), SimulationError> {
        self.check_options()?;
        let (t0, t1) = time_span;
        if !t0.is_finite() || !t1.is_finite() || t1 < t0 {
            return Err(SimulationError::InvalidTimeSpan(t0, t1));
        }
        if !all_finite(y0) {
            return Err(SimulationError::IntegrationFailure {
                t: t0,
                reason: "initial state is not finite".to_string(),
            });
        }
        let n_samples = self.options.n_samples;
        let t_mesh = linspace(t0, t1, n_samples);
        let mut solution = DMatrix::zeros(n_samples, y0.len());

        if n_samples == 1 || t1 == t0 {
            for mut row in solution.row_iter_mut() {
                row.copy_from(&y0.transpose());
            }
            self.t_mesh = Some(t_mesh);
            self.solution = Some(solution);
            self.stats = SolverStats::default();
            return Ok(());
        }

        let dx = (t1 - t0) / (n_samples - 1) as f64;
        let mut stepper = Dopri5::new(
            system,
            t0,
            t1,
            dx * DENSE_STEP_SHRINK,
            y0.clone(),
            self.options.rtol,
            self.options.atol,
        );
        let stats = match stepper.integrate() {
            Ok(stats) => stats,
            Err(e) => {
                return Err(SimulationError::IntegrationFailure {
                    t: stepper.x_out().last().copied().unwrap_or(t0),
                    reason: e.to_string(),
                });
            }
        };

        let (x_out, y_out) = (stepper.x_out(), stepper.y_out());
        let tol = 1e-6 * dx;
        let mut j = 0;
        for (row, &target) in t_mesh.iter().enumerate() {
            while j < x_out.len() && x_out[j] < target - tol {
                j += 1;
            }
            let state = match x_out.get(j) {
                Some(&x) if (x - target).abs() <= tol => &y_out[j],
                _ if row == 0 => y0,
                _ => {
                    return Err(SimulationError::IntegrationFailure {
                        t: target,
                        reason: "no solver output at sample time".to_string(),
                    });
                }
            };
            if !all_finite(state) {
                return Err(SimulationError::IntegrationFailure {
                    t: target,
                    reason: "state is not finite".to_string(),
                });
            }
            solution.row_mut(row).copy_from(&state.transpose());
        }

        self.stats = SolverStats {
            accepted_steps: stats.accepted_steps as usize,
            rejected_steps: stats.rejected_steps as usize,
            rhs_evaluations: stats.num_eval as usize,
        };
        info!(
            "integration finished: {} accepted, {} rejected steps, {} rhs evaluations",
            self.stats.accepted_steps, self.stats.rejected_steps, self.stats.rhs_evaluations
        );
        self.t_mesh = Some(t_mesh);
        self.solution = Some(solution);
        Ok(())
    }
}
