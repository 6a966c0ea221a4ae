//! # Reaction Dynamics Simulation
//!
//! One simulation run is a single linear pass over reactions validated once by
//! `parse_reactions`:
//! 1. number the species
//! 2. sample equilibrium constants and build the flux model
//! 3. pad/truncate the initial concentrations to the number of species
//! 4. integrate and sample the solution
//!
//! The random source for the equilibrium constants is passed in by the caller; it is not
//! reset between runs.
use super::ode_integrator::{IVPSolver, SolverOptions};
use crate::Kinetics::kinetic_model::KineticModel;
use crate::Kinetics::reaction_parser::ParsedReaction;
use crate::Kinetics::species_registry::{SpeciesRegistry, fit_initial_concentrations};
use log::info;
use nalgebra::{DMatrix, DVector};
use rand::Rng;
use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimulationError {
    #[error("no valid reactions to simulate")]
    EmptyNetwork,
    #[error("invalid time span ({0}, {1})")]
    InvalidTimeSpan(f64, f64),
    #[error("invalid solver options: {0}")]
    InvalidOptions(String),
    #[error("integration failed at t = {t}: {reason}")]
    IntegrationFailure { t: f64, reason: String },
}

/// sampled solution of one run: rows of `y` are samples, columns are species
#[derive(Debug, Clone)]
pub struct TimeSeries {
    pub t: DVector<f64>,
    pub y: DMatrix<f64>,
    pub species: Vec<String>,
    pub equilibrium_constants: HashMap<String, f64>,
}

impl TimeSeries {
    pub fn n_samples(&self) -> usize {
        self.t.len()
    }

    pub fn initial(&self) -> Option<DVector<f64>> {
        (self.y.nrows() > 0).then(|| self.y.row(0).transpose())
    }

    pub fn last(&self) -> Option<DVector<f64>> {
        let n = self.y.nrows();
        (n > 0).then(|| self.y.row(n - 1).transpose())
    }
    /// concentration profile of one species
    pub fn species_profile(&self, name: &str) -> Option<DVector<f64>> {
        let col = self.species.iter().position(|s| s == name)?;
        Some(self.y.column(col).into_owned())
    }
}

/// initial vector as the driver builds it: the chosen value followed by `background` for every
/// other fetched reaction. Sized by reaction count, the registry later pads or truncates it
pub fn initial_concentrations_for(
    initial_concentration: f64,
    background: f64,
    n_reactions: usize,
) -> Vec<f64> {
    let mut initial = vec![initial_concentration];
    initial.extend(std::iter::repeat(background).take(n_reactions.saturating_sub(1)));
    initial
}

/// runs the whole pipeline for one initial concentration vector
pub fn simulate_reaction_dynamics<R: Rng>(
    reactions: &[ParsedReaction],
    initial_concentrations: &[f64],
    time_span: (f64, f64),
    options: &SolverOptions,
    rng: &mut R,
) -> Result<TimeSeries, SimulationError> {
    if reactions.is_empty() {
        return Err(SimulationError::EmptyNetwork);
    }
    let registry = SpeciesRegistry::from_reactions(reactions);
    let model = KineticModel::build(reactions, &registry, rng);
    let y0 = fit_initial_concentrations(initial_concentrations, registry.len());
    info!(
        "simulating {} reactions, {} species over t = ({}, {})",
        reactions.len(),
        registry.len(),
        time_span.0,
        time_span.1
    );

    let equilibrium_constants = model.equilibrium_constants().clone();
    let mut solver = IVPSolver::new(options.clone());
    solver.solve(model, &y0, time_span)?;
    let (t, y) = match (solver.t_mesh, solver.solution) {
        (Some(t), Some(y)) => (t, y),
        _ => {
            return Err(SimulationError::IntegrationFailure {
                t: time_span.0,
                reason: "solver returned no solution".to_string(),
            });
        }
    };
    Ok(TimeSeries {
        t,
        y,
        species: registry.names().to_vec(),
        equilibrium_constants,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Kinetics::reaction_parser::{Reaction, parse_reactions};
    use approx::assert_relative_eq;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn reactions(pairs: &[(&str, &str)]) -> Vec<ParsedReaction> {
        let raw: Vec<Reaction> = pairs.iter().map(|(id, d)| Reaction::new(id, d)).collect();
        parse_reactions(&raw).reactions
    }

    #[test]
    fn test_initial_vector_layout() {
        assert_eq!(initial_concentrations_for(0.5, 0.1, 3), vec![0.5, 0.1, 0.1]);
        assert_eq!(initial_concentrations_for(2.0, 0.1, 1), vec![2.0]);
        assert_eq!(initial_concentrations_for(2.0, 0.1, 0), vec![2.0]);
    }

    #[test]
    fn test_single_reaction_run() {
        let mut rng = StdRng::seed_from_u64(1);
        let ts = simulate_reaction_dynamics(
            &reactions(&[("R1", "A <=> B")]),
            &[1.0],
            (0.0, 10.0),
            &SolverOptions::default(),
            &mut rng,
        )
        .unwrap();
        assert_eq!(ts.n_samples(), 100);
        assert_eq!(ts.species, vec!["A", "B"]);
        assert_eq!(ts.y.ncols(), 2);
        // padded with zero for B
        assert_eq!(ts.initial().unwrap().as_slice(), &[1.0, 0.0]);
        // A + B is conserved, and the system relaxes to A = k B
        let k = ts.equilibrium_constants["R1"];
        let last = ts.last().unwrap();
        assert_relative_eq!(last[0] + last[1], 1.0, epsilon = 1e-4);
        assert_relative_eq!(last[0], k * last[1], epsilon = 1e-2);
    }

    #[test]
    fn test_padding_reaches_the_solver() {
        let mut rng = StdRng::seed_from_u64(3);
        let ts = simulate_reaction_dynamics(
            &reactions(&[("R1", "A <=> B + C")]),
            &[0.5],
            (0.0, 1.0),
            &SolverOptions::default(),
            &mut rng,
        )
        .unwrap();
        assert_eq!(ts.initial().unwrap().as_slice(), &[0.5, 0.0, 0.0]);
    }

    #[test]
    fn test_truncation_reaches_the_solver() {
        let mut rng = StdRng::seed_from_u64(3);
        let ts = simulate_reaction_dynamics(
            &reactions(&[("R1", "A <=> B")]),
            &[2.0, 0.1, 0.1, 0.1],
            (0.0, 1.0),
            &SolverOptions::default(),
            &mut rng,
        )
        .unwrap();
        assert_eq!(ts.initial().unwrap().as_slice(), &[2.0, 0.1]);
    }

    #[test]
    fn test_malformed_reactions_are_skipped() {
        let mut rng = StdRng::seed_from_u64(5);
        let ts = simulate_reaction_dynamics(
            &reactions(&[("R1", "A <=> B"), ("R2", "broken"), ("R3", "B <=> C")]),
            &[1.0, 0.1, 0.1],
            (0.0, 5.0),
            &SolverOptions::default(),
            &mut rng,
        )
        .unwrap();
        assert_eq!(ts.species, vec!["A", "B", "C"]);
        assert_eq!(ts.equilibrium_constants.len(), 2);
        assert!(ts.species_profile("C").is_some());
        assert!(ts.species_profile("D").is_none());
    }

    #[test]
    fn test_only_malformed_is_empty_network() {
        let mut rng = StdRng::seed_from_u64(5);
        let err = simulate_reaction_dynamics(
            &reactions(&[("R1", "broken")]),
            &[1.0],
            (0.0, 5.0),
            &SolverOptions::default(),
            &mut rng,
        )
        .unwrap_err();
        assert!(matches!(err, SimulationError::EmptyNetwork));
    }

    #[test]
    fn test_seeded_runs_are_reproducible() {
        let input = reactions(&[("R1", "A + B <=> C"), ("R2", "C <=> D")]);
        let run = |seed| {
            let mut rng = StdRng::seed_from_u64(seed);
            simulate_reaction_dynamics(
                &input,
                &[1.0, 0.1],
                (0.0, 10.0),
                &SolverOptions::default(),
                &mut rng,
            )
            .unwrap()
        };
        let a = run(11);
        let b = run(11);
        assert_eq!(a.y, b.y);
        assert_eq!(a.equilibrium_constants, b.equilibrium_constants);
    }
}
