//! # KEGG Reaction Lookup Module
//!
//! ## Aim
//! Fetches the reactions a molecule takes part in from the KEGG REST service
//! (https://rest.kegg.jp) and turns the answer into `(reaction_id, description)` pairs.
//!
//! ## Main Data Structures and Logic
//! - `HttpClient`: trait over the HTTP GET call, implemented for `reqwest::blocking::Client`
//!   and for mocks in tests
//! - `KeggClient<C>`: builds the `find/reaction/<molecule>` URL and fetches the text
//! - `parse_records()`: splits the tab separated answer; lines without a tab are recorded as
//!   `Diagnostic::MalformedRecord` and skipped, blank lines are ignored
//! - `FetchedReactions`: reactions plus skipped lines, with a pretty printed report
//!
//! ## Usage
//! ```rust, ignore
//! let client = KeggClient::new("https://rest.kegg.jp");
//! let fetched = client.fetch_reactions_for_molecule("C00031")?;
//! fetched.pretty_print("C00031");
//! ```
use crate::Kinetics::reaction_parser::{Diagnostic, Reaction};
use log::{info, warn};
use prettytable::{Cell, Row, Table};
use regex::Regex;
use reqwest::blocking::Client;
use thiserror::Error;
use url::Url;

pub const KEGG_REST_URL: &str = "https://rest.kegg.jp";

#[derive(Debug, Error)]
pub enum KeggError {
    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),
    #[error("URL parsing error: {0}")]
    UrlError(#[from] url::ParseError),
    #[error("base URL {0} can not take path segments")]
    InvalidBaseUrl(String),
    #[error("KEGG answered with HTTP status {0}")]
    Status(u16),
    #[error("empty molecule identifier")]
    EmptyQuery,
}

/// HTTP client trait for dependency injection
pub trait HttpClient {
    fn get_text(&self, url: &str) -> Result<String, KeggError>;
}

impl HttpClient for Client {
    fn get_text(&self, url: &str) -> Result<String, KeggError> {
        let response = self.get(url).send()?;
        let status = response.status();
        // KEGG answers 404 when a query has no hits
        if status == reqwest::StatusCode::NOT_FOUND {
            return Ok(String::new());
        }
        if !status.is_success() {
            return Err(KeggError::Status(status.as_u16()));
        }
        Ok(response.text()?)
    }
}

/// reactions found for a molecule and the lines that could not be split
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FetchedReactions {
    pub reactions: Vec<Reaction>,
    pub skipped: Vec<Diagnostic>,
}

impl FetchedReactions {
    pub fn is_empty(&self) -> bool {
        self.reactions.is_empty()
    }

    pub fn reactions_table(&self) -> Table {
        let mut table = Table::new();
        table.add_row(Row::new(vec![
            Cell::new("Reaction ID"),
            Cell::new("Description"),
        ]));
        for reaction in &self.reactions {
            table.add_row(Row::new(vec![
                Cell::new(&reaction.id),
                Cell::new(&reaction.description),
            ]));
        }
        table
    }

    pub fn pretty_print(&self, molecule_id: &str) {
        let rule = "=".repeat(50);
        println!("{}", rule);
        println!(
            "Reactions involving {}: {} found",
            molecule_id,
            self.reactions.len()
        );
        println!("{}", rule);
        if self.reactions.is_empty() {
            println!("No valid reactions found.");
        } else {
            self.reactions_table().printstd();
        }
        if self.skipped.is_empty() {
            println!("\nNo malformed lines encountered.");
        } else {
            println!("\nSkipped lines due to formatting issues:");
            for diagnostic in &self.skipped {
                match diagnostic {
                    Diagnostic::MalformedRecord { line } => println!(" - {}", line),
                    other => println!(" - {}", other),
                }
            }
        }
    }
}

/// splits `<reaction_id>\t<description>` lines; the description is everything after the first tab
pub fn parse_records(text: &str) -> FetchedReactions {
    let mut fetched = FetchedReactions::default();
    for line in text.lines() {
        if line.trim().is_empty() {
            continue;
        }
        match line.split_once('\t') {
            Some((id, description)) => fetched.reactions.push(Reaction::new(id, description)),
            None => {
                let diagnostic = Diagnostic::MalformedRecord {
                    line: line.to_string(),
                };
                warn!("{}", diagnostic);
                fetched.skipped.push(diagnostic);
            }
        }
    }
    fetched
}

/// true for KEGG compound, drug and glycan ids such as C00031 or cpd:C00031
pub fn looks_like_kegg_id(molecule_id: &str) -> bool {
    match Regex::new(r"^((cpd|dr|gl):)?[CDG]\d{5}$") {
        Ok(re) => re.is_match(molecule_id.trim()),
        Err(_) => false,
    }
}

pub struct KeggClient<C: HttpClient> {
    client: C,
    base_url: String,
}

impl KeggClient<Client> {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.to_string(),
        }
    }
}

impl<C: HttpClient> KeggClient<C> {
    pub fn with_client(client: C, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.to_string(),
        }
    }

    pub fn construct_url(&self, molecule_id: &str) -> Result<Url, KeggError> {
        let molecule_id = molecule_id.trim();
        if molecule_id.is_empty() {
            return Err(KeggError::EmptyQuery);
        }
        let mut url = Url::parse(&self.base_url)?;
        url.path_segments_mut()
            .map_err(|_| KeggError::InvalidBaseUrl(self.base_url.clone()))?
            .pop_if_empty()
            .extend(&["find", "reaction", molecule_id]);
        Ok(url)
    }

    pub fn fetch_reactions_for_molecule(
        &self,
        molecule_id: &str,
    ) -> Result<FetchedReactions, KeggError> {
        if !looks_like_kegg_id(molecule_id) {
            warn!(
                "'{}' does not look like a KEGG compound id, querying it as free text",
                molecule_id.trim()
            );
        }
        let url = self.construct_url(molecule_id)?;
        info!("fetching reactions from {}", url);
        let text = self.client.get_text(url.as_str())?;
        let fetched = parse_records(&text);
        info!(
            "{} reactions fetched, {} lines skipped",
            fetched.reactions.len(),
            fetched.skipped.len()
        );
        Ok(fetched)
    }
}
