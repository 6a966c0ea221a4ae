//! # Kinetic Model Builder
//!
//! Builds the right-hand side `dy/dt = f(t, y)` of the reaction network.
//!
//! ## Model
//!
//! Every reaction j with substrate indices S, product indices P and equilibrium
//! constant k_j contributes
//!
//! ```text
//! forward_j = Π y[i], i ∈ S          (empty product = 1)
//! reverse_j = k_j · Π y[m], m ∈ P     (empty product = 1)
//! net_j     = forward_j - reverse_j
//! dy[i] -= net_j  for i ∈ S
//! dy[m] += net_j  for m ∈ P
//! ```
//!
//! The forward rate constant is implicitly 1, only the reverse flux is scaled by k_j.
//! Coupled (cascading) reactions interact only through shared species indices.
//!
//! ## Equilibrium constants
//!
//! k_j is sampled uniformly from `[0.1, 10)` when the model is built. The random source is
//! an explicit argument, so a seeded generator gives a reproducible model. Reactions with
//! the same id share one constant.
//!
//! Substrate and product index arrays are resolved once in [`KineticModel::build`], the
//! derivative function does no name lookups.
use crate::Kinetics::reaction_parser::ParsedReaction;
use crate::Kinetics::species_registry::SpeciesRegistry;
use log::info;
use nalgebra::DVector;
use rand::Rng;
use std::collections::HashMap;
use std::ops::Range;

/// range of sampled equilibrium constants
pub const K_EQ_RANGE: Range<f64> = 0.1..10.0;

/// reaction with species names already resolved to registry indices
#[derive(Debug, Clone, PartialEq)]
pub struct IndexedReaction {
    pub id: String,
    pub substrates: Vec<usize>,
    pub products: Vec<usize>,
    pub k_eq: f64,
}

impl IndexedReaction {
    /// (forward, reverse, net) flux for the state y. Indices beyond y are skipped
    pub fn fluxes(&self, y: &DVector<f64>) -> (f64, f64, f64) {
        let forward: f64 = self.substrates.iter().filter_map(|&i| y.get(i)).product();
        let reverse: f64 =
            self.k_eq * self.products.iter().filter_map(|&i| y.get(i)).product::<f64>();
        (forward, reverse, forward - reverse)
    }
}

#[derive(Debug, Clone)]
pub struct KineticModel {
    reactions: Vec<IndexedReaction>,
    equilibrium_constants: HashMap<String, f64>,
    n_species: usize,
}

impl KineticModel {
    /// samples equilibrium constants and resolves species indices
    pub fn build<R: Rng>(
        reactions: &[ParsedReaction],
        registry: &SpeciesRegistry,
        rng: &mut R,
    ) -> Self {
        let mut equilibrium_constants: HashMap<String, f64> = HashMap::new();
        for reaction in reactions {
            equilibrium_constants
                .entry(reaction.id().to_string())
                .or_insert_with(|| rng.gen_range(K_EQ_RANGE));
        }
        Self::with_constants(reactions, registry, equilibrium_constants)
    }

    /// builds the model with given constants; reactions missing from the table get k = 1
    pub fn with_constants(
        reactions: &[ParsedReaction],
        registry: &SpeciesRegistry,
        equilibrium_constants: HashMap<String, f64>,
    ) -> Self {
        let indexed: Vec<IndexedReaction> = reactions
            .iter()
            .map(|reaction| IndexedReaction {
                id: reaction.id().to_string(),
                substrates: registry.indices_of(reaction.substrates()),
                products: registry.indices_of(reaction.products()),
                k_eq: equilibrium_constants
                    .get(reaction.id())
                    .copied()
                    .unwrap_or(1.0),
            })
            .collect();
        info!(
            "kinetic model built: {} reactions, {} species",
            indexed.len(),
            registry.len()
        );
        Self {
            reactions: indexed,
            equilibrium_constants,
            n_species: registry.len(),
        }
    }

    pub fn reactions(&self) -> &[IndexedReaction] {
        &self.reactions
    }

    pub fn equilibrium_constants(&self) -> &HashMap<String, f64> {
        &self.equilibrium_constants
    }

    pub fn n_species(&self) -> usize {
        self.n_species
    }
    /// dy/dt written into `dydt`, which must have the length of y
    pub fn rhs(&self, _t: f64, y: &DVector<f64>, dydt: &mut DVector<f64>) {
        dydt.fill(0.0);
        for reaction in &self.reactions {
            let (_, _, net) = reaction.fluxes(y);
            for &i in &reaction.substrates {
                if let Some(d) = dydt.get_mut(i) {
                    *d -= net;
                }
            }
            for &i in &reaction.products {
                if let Some(d) = dydt.get_mut(i) {
                    *d += net;
                }
            }
        }
    }

    pub fn derivative(&self, t: f64, y: &DVector<f64>) -> DVector<f64> {
        let mut dydt = DVector::zeros(y.len());
        self.rhs(t, y, &mut dydt);
        dydt
    }
    /// (forward, reverse, net) for every reaction, in model order
    pub fn fluxes(&self, y: &DVector<f64>) -> Vec<(f64, f64, f64)> {
        self.reactions.iter().map(|r| r.fluxes(y)).collect()
    }
}
