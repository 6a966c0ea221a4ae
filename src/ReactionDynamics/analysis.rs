/// Net concentration change of every species between the first and the last sample
use super::simulation::TimeSeries;
use prettytable::{Cell, Row, Table};
use std::fmt;

/// size of |final - initial|; bin edges are right-inclusive: (.., 0.1], (0.1, 1], (1, ..)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Magnitude {
    Minor,
    Moderate,
    Major,
}

impl Magnitude {
    pub fn classify(change: f64) -> Self {
        let change = change.abs();
        if change <= 0.1 {
            Magnitude::Minor
        } else if change <= 1.0 {
            Magnitude::Moderate
        } else {
            Magnitude::Major
        }
    }
}

impl fmt::Display for Magnitude {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Magnitude::Minor => "Minor",
            Magnitude::Moderate => "Moderate",
            Magnitude::Major => "Major",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SpeciesChange {
    pub species: String,
    pub initial: f64,
    pub final_: f64,
    pub change: f64,
    pub magnitude: Magnitude,
}

impl SpeciesChange {
    pub fn new(species: &str, initial: f64, final_: f64) -> Self {
        let change = final_ - initial;
        Self {
            species: species.to_string(),
            initial,
            final_,
            change,
            magnitude: Magnitude::classify(change),
        }
    }
}

pub fn analyze_changes(series: &TimeSeries) -> Vec<SpeciesChange> {
    let (Some(first), Some(last)) = (series.initial(), series.last()) else {
        return Vec::new();
    };
    series
        .species
        .iter()
        .enumerate()
        .map(|(i, name)| SpeciesChange::new(name, first[i], last[i]))
        .collect()
}

pub fn changes_table(changes: &[SpeciesChange]) -> Table {
    let mut table = Table::new();
    table.add_row(Row::new(vec![
        Cell::new("Species"),
        Cell::new("Initial Concentration"),
        Cell::new("Final Concentration"),
        Cell::new("Change"),
        Cell::new("Magnitude"),
    ]));
    for c in changes {
        table.add_row(Row::new(vec![
            Cell::new(&c.species),
            Cell::new(&format!("{:.2}", c.initial)),
            Cell::new(&format!("{:.2}", c.final_)),
            Cell::new(&format!("{:.2}", c.change)),
            Cell::new(&c.magnitude.to_string()),
        ]));
    }
    table
}

pub fn print_changes_table(changes: &[SpeciesChange]) {
    println!("\nSummary of Changes in Concentrations:");
    changes_table(changes).printstd();
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::{DMatrix, DVector};
    use std::collections::HashMap;

    #[test]
    fn test_classification_examples() {
        assert_eq!(SpeciesChange::new("A", 1.0, 1.05).magnitude, Magnitude::Minor);
        assert_eq!(SpeciesChange::new("A", 1.0, 0.2).magnitude, Magnitude::Moderate);
        assert_eq!(SpeciesChange::new("A", 1.0, 3.0).magnitude, Magnitude::Major);
    }

    #[test]
    fn test_bin_edges() {
        assert_eq!(Magnitude::classify(0.0), Magnitude::Minor);
        assert_eq!(Magnitude::classify(0.1), Magnitude::Minor);
        assert_eq!(Magnitude::classify(-0.5), Magnitude::Moderate);
        assert_eq!(Magnitude::classify(1.0), Magnitude::Moderate);
        assert_eq!(Magnitude::classify(-1.5), Magnitude::Major);
    }

    #[test]
    fn test_analyze_time_series() {
        let series = TimeSeries {
            t: DVector::from_vec(vec![0.0, 1.0, 2.0]),
            y: DMatrix::from_row_slice(3, 2, &[1.0, 0.0, 0.6, 0.4, 0.2, 0.8]),
            species: vec!["A".to_string(), "B".to_string()],
            equilibrium_constants: HashMap::new(),
        };
        let changes = analyze_changes(&series);
        assert_eq!(changes.len(), 2);
        assert_eq!(changes[0].species, "A");
        assert!((changes[0].change + 0.8).abs() < 1e-12);
        assert_eq!(changes[0].magnitude, Magnitude::Moderate);
        assert_eq!(changes[1].final_, 0.8);
        let table = changes_table(&changes);
        assert_eq!(table.len(), 3);
        assert!(table.to_string().contains("Moderate"));
    }
}
