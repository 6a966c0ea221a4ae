//! # Reaction Parser
//!
//! Turns raw reversible reaction descriptions of the form `"A + B <=> C + D"` into
//! validated reactions with ordered substrate and product names.
//!
//! A description is accepted only when it contains exactly one `<=>` separator and
//! every side and every term is non-empty after trimming. Anything else is not an
//! error for the batch: the reaction is dropped and a [`Diagnostic`] is recorded, so
//! the rest of the reactions are still processed.
//!
//! [`ParsedReaction`] can only be produced here, so the later stages (species registry,
//! kinetic model, reaction graph) never see malformed descriptions.
//!
//! ## Usage
//! ```rust
//! use KiNet::Kinetics::reaction_parser::{parse_reactions, Reaction};
//! let reactions = vec![
//!     Reaction::new("R1", "A + B <=> C"),
//!     Reaction::new("R2", "no separator here"),
//! ];
//! let batch = parse_reactions(&reactions);
//! assert_eq!(batch.reactions.len(), 1);
//! assert_eq!(batch.diagnostics.len(), 1);
//! ```
use log::warn;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// reversible reaction separator
pub const REVERSIBLE_SEPARATOR: &str = "<=>";
/// separator between terms of one side of the equation
pub const TERM_SEPARATOR: &str = " + ";

/// reaction record as it comes from the database: id and raw description
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reaction {
    pub id: String,
    pub description: String,
}

impl Reaction {
    pub fn new(id: &str, description: &str) -> Self {
        Self {
            id: id.to_string(),
            description: description.to_string(),
        }
    }
}

/// reaction that passed validation: substrate and product names are trimmed, order and
/// duplicates within a side are preserved
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedReaction {
    id: String,
    substrates: Vec<String>,
    products: Vec<String>,
}

impl ParsedReaction {
    pub fn id(&self) -> &str {
        &self.id
    }
    pub fn substrates(&self) -> &[String] {
        &self.substrates
    }
    pub fn products(&self) -> &[String] {
        &self.products
    }
    /// substrates followed by products
    pub fn species(&self) -> impl Iterator<Item = &String> {
        self.substrates.iter().chain(self.products.iter())
    }
}

/// reasons why a description is rejected
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ReactionParseError {
    #[error("separator '<=>' not found")]
    MissingSeparator,
    #[error("separator '<=>' found {0} times, expected exactly once")]
    MultipleSeparators(usize),
    #[error("one side of the equation is empty")]
    EmptySide,
    #[error("equation contains an empty term")]
    EmptyTerm,
}

/// recoverable problem met while reading reaction data. Diagnostics are logged as soon
/// as they are recorded and kept for the final report
#[derive(Debug, Clone, PartialEq)]
pub enum Diagnostic {
    /// database line without the tab delimiter between id and description
    MalformedRecord { line: String },
    /// description that can not be split into substrates and products
    MalformedReaction {
        id: String,
        description: String,
        reason: ReactionParseError,
    },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::MalformedRecord { line } => {
                write!(f, "skipped line due to formatting issues: {}", line)
            }
            Diagnostic::MalformedReaction {
                id,
                description,
                reason,
            } => write!(
                f,
                "skipping malformed reaction {}: {} ({})",
                id, description, reason
            ),
        }
    }
}

/// result of parsing a batch of reactions
#[derive(Debug, Clone, Default)]
pub struct ParsedBatch {
    pub reactions: Vec<ParsedReaction>,
    pub diagnostics: Vec<Diagnostic>,
}

fn split_side(side: &str) -> Result<Vec<String>, ReactionParseError> {
    if side.trim().is_empty() {
        return Err(ReactionParseError::EmptySide);
    }
    let terms: Vec<String> = side
        .split(TERM_SEPARATOR)
        .map(|term| term.trim().to_string())
        .collect();
    if terms.iter().any(|term| term.is_empty()) {
        return Err(ReactionParseError::EmptyTerm);
    }
    Ok(terms)
}

/// splits a description into (substrates, products)
pub fn parse_description(
    description: &str,
) -> Result<(Vec<String>, Vec<String>), ReactionParseError> {
    let sides: Vec<&str> = description.split(REVERSIBLE_SEPARATOR).collect();
    match sides.len() {
        1 => Err(ReactionParseError::MissingSeparator),
        2 => {
            let substrates = split_side(sides[0])?;
            let products = split_side(sides[1])?;
            Ok((substrates, products))
        }
        n => Err(ReactionParseError::MultipleSeparators(n - 1)),
    }
}

/// validates one reaction
pub fn parse_reaction(reaction: &Reaction) -> Result<ParsedReaction, Diagnostic> {
    match parse_description(&reaction.description) {
        Ok((substrates, products)) => Ok(ParsedReaction {
            id: reaction.id.clone(),
            substrates,
            products,
        }),
        Err(reason) => Err(Diagnostic::MalformedReaction {
            id: reaction.id.clone(),
            description: reaction.description.clone(),
            reason,
        }),
    }
}

/// validates all reactions, malformed ones are logged and returned as diagnostics.
/// `reactions.len() + diagnostics.len()` always equals the number of input reactions
pub fn parse_reactions(reactions: &[Reaction]) -> ParsedBatch {
    let mut batch = ParsedBatch::default();
    for reaction in reactions {
        match parse_reaction(reaction) {
            Ok(parsed) => batch.reactions.push(parsed),
            Err(diagnostic) => {
                warn!("{}", diagnostic);
                batch.diagnostics.push(diagnostic);
            }
        }
    }
    batch
}
