/// Species registry: dense, stable numbering of all species met in a set of reactions.
/// Names get indices in first-seen order: reactions in input order, substrates before products.
use crate::Kinetics::reaction_parser::ParsedReaction;
use nalgebra::DVector;
use std::collections::HashMap;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpeciesRegistry {
    names: Vec<String>,
    index: HashMap<String, usize>,
}

impl SpeciesRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_reactions(reactions: &[ParsedReaction]) -> Self {
        let mut registry = Self::new();
        for reaction in reactions {
            for name in reaction.species() {
                registry.insert(name);
            }
        }
        registry
    }
    /// returns index of the name, registering it if it is new
    pub fn insert(&mut self, name: &str) -> usize {
        let name = name.trim();
        if let Some(&i) = self.index.get(name) {
            return i;
        }
        let i = self.names.len();
        self.names.push(name.to_string());
        self.index.insert(name.to_string(), i);
        i
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.index.get(name.trim()).copied()
    }

    pub fn name(&self, index: usize) -> Option<&str> {
        self.names.get(index).map(|s| s.as_str())
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
    /// indices of the names in the same order, unknown names are skipped
    pub fn indices_of(&self, names: &[String]) -> Vec<usize> {
        names.iter().filter_map(|n| self.index_of(n)).collect()
    }
}

/// pads the vector with zeros or truncates it so it has exactly `n_species` entries
pub fn fit_initial_concentrations(initial: &[f64], n_species: usize) -> DVector<f64> {
    DVector::from_fn(n_species, |i, _| initial.get(i).copied().unwrap_or(0.0))
}
