/// Directed reaction network: every substrate is connected to every product of the same reaction,
/// the edge is labelled with the reaction id. A species pair has at most one edge, a later
/// reaction relabels it.
use crate::Kinetics::reaction_parser::ParsedReaction;
use petgraph::Direction;
use petgraph::graph::{DiGraph, NodeIndex};
use prettytable::{Cell, Row, Table};
use std::collections::HashMap;

#[derive(Debug, Clone, Default)]
pub struct ReactionGraph {
    pub graph: DiGraph<String, String>,
    nodes: HashMap<String, NodeIndex>,
}

impl ReactionGraph {
    pub fn from_reactions(reactions: &[ParsedReaction]) -> Self {
        let mut network = Self::default();
        for reaction in reactions {
            for substrate in reaction.substrates() {
                let from = network.node(substrate);
                for product in reaction.products() {
                    let to = network.node(product);
                    network
                        .graph
                        .update_edge(from, to, reaction.id().to_string());
                }
            }
        }
        network
    }

    fn node(&mut self, name: &str) -> NodeIndex {
        if let Some(&idx) = self.nodes.get(name) {
            return idx;
        }
        let idx = self.graph.add_node(name.to_string());
        self.nodes.insert(name.to_string(), idx);
        idx
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// id of the reaction labelling the edge `from -> to`
    pub fn reaction_between(&self, from: &str, to: &str) -> Option<&str> {
        let (a, b) = (self.nodes.get(from)?, self.nodes.get(to)?);
        let edge = self.graph.find_edge(*a, *b)?;
        self.graph.edge_weight(edge).map(String::as_str)
    }

    fn neighbors(&self, name: &str, direction: Direction) -> Vec<&str> {
        let Some(&idx) = self.nodes.get(name) else {
            return Vec::new();
        };
        let mut names: Vec<&str> = self
            .graph
            .neighbors_directed(idx, direction)
            .map(|n| self.graph[n].as_str())
            .collect();
        names.sort_unstable();
        names
    }
    /// species reachable in one step from `name`, sorted by name
    pub fn successors(&self, name: &str) -> Vec<&str> {
        self.neighbors(name, Direction::Outgoing)
    }

    pub fn predecessors(&self, name: &str) -> Vec<&str> {
        self.neighbors(name, Direction::Incoming)
    }

    pub fn out_degree(&self, name: &str) -> usize {
        self.successors(name).len()
    }

    pub fn in_degree(&self, name: &str) -> usize {
        self.predecessors(name).len()
    }
    /// up to `n` species with the largest in + out degree, ties broken by name
    pub fn hubs(&self, n: usize) -> Vec<(String, usize)> {
        let mut degrees: Vec<(String, usize)> = self
            .graph
            .node_indices()
            .map(|idx| {
                let degree = self.graph.neighbors_directed(idx, Direction::Outgoing).count()
                    + self.graph.neighbors_directed(idx, Direction::Incoming).count();
                (self.graph[idx].clone(), degree)
            })
            .collect();
        degrees.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        degrees.truncate(n);
        degrees
    }

    pub fn print_summary(&self, n_hubs: usize) {
        println!(
            "Reaction network: {} species, {} edges",
            self.node_count(),
            self.edge_count()
        );
        let mut table = Table::new();
        table.add_row(Row::new(vec![Cell::new("Species"), Cell::new("Degree")]));
        for (name, degree) in self.hubs(n_hubs) {
            table.add_row(Row::new(vec![
                Cell::new(&name),
                Cell::new(&degree.to_string()),
            ]));
        }
        table.printstd();
    }
}
