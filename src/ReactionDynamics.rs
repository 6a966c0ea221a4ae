//! # Reaction Dynamics Module
//!
//! Time evolution of the concentrations of a reaction network.
//!
//! ## Mathematical Model
//!
//! For reactions j with substrates S_j, products P_j and equilibrium constant k_j:
//!
//! ```text
//! w_j     = Π_{i∈S_j} y_i  -  k_j · Π_{m∈P_j} y_m
//! dy_i/dt = Σ_j ( [i∈P_j] - [i∈S_j] ) · w_j
//! ```
//!
//! Membership is counted with multiplicity, so a species listed twice on one side is consumed
//! or produced twice.
//!
//! ## Numerical Solution
//!
//! The system is integrated with the adaptive Dormand-Prince RK5(4) stepper of `ode_solvers`
//! and sampled at evenly spaced output times (100 by default).
//!
//! ## Submodules
//! - `ode_integrator`: the solver and its options
//! - `simulation`: the per-run pipeline from raw reactions to a `TimeSeries`
//! - `analysis`: Minor/Moderate/Major classification of net changes
pub mod analysis;
pub mod ode_integrator;
pub mod simulation;
