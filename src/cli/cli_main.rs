use crate::DBhandlers::kegg_api::{HttpClient, KeggClient, KeggError};
use crate::Kinetics::reaction_graph::ReactionGraph;
use crate::Kinetics::reaction_parser::{ParsedReaction, parse_reactions};
use crate::ReactionDynamics::analysis::{SpeciesChange, analyze_changes, print_changes_table};
use crate::ReactionDynamics::simulation::{
    SimulationError, TimeSeries, initial_concentrations_for, simulate_reaction_dynamics,
};
use crate::Utils::plots::{PlotError, plot_dynamics};
use crate::settings::{Settings, SettingsError};
use log::{info, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::io::{self, BufRead, Write};
use thiserror::Error;

pub const PROMPT: &str = "Enter the KEGG ID of the molecule (e.g., C00031 for Glucose): ";
const N_HUBS: usize = 5;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("KEGG request failed: {0}")]
    Kegg(#[from] KeggError),
    #[error("simulation failed: {0}")]
    Simulation(#[from] SimulationError),
    #[error("{0}")]
    Settings(#[from] SettingsError),
    #[error("plotting failed: {0}")]
    Plot(#[from] PlotError),
    #[error("input/output error: {0}")]
    Io(#[from] io::Error),
}

/// result of one run of the concentration scan
#[derive(Debug, Clone)]
pub struct RunReport {
    pub initial_concentration: f64,
    pub series: TimeSeries,
    pub changes: Vec<SpeciesChange>,
}

/// equilibrium constants come from `settings.seed` when given, otherwise from entropy
pub fn make_rng(settings: &Settings) -> StdRng {
    match settings.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// one simulation per value of `initial_concentration_range`, sharing the same random source.
/// The initial vector is sized by `n_fetched`, the number of reactions before validation
pub fn simulate_concentration_scan<R: Rng>(
    reactions: &[ParsedReaction],
    n_fetched: usize,
    settings: &Settings,
    rng: &mut R,
) -> Result<Vec<RunReport>, AppError> {
    let options = settings.solver_options();
    let mut reports = Vec::with_capacity(settings.initial_concentration_range.len());
    for &c0 in &settings.initial_concentration_range {
        let initial = initial_concentrations_for(
            c0,
            settings.background_concentration,
            n_fetched,
        );
        let series =
            simulate_reaction_dynamics(reactions, &initial, settings.time_span, &options, rng)?;
        let changes = analyze_changes(&series);
        reports.push(RunReport {
            initial_concentration: c0,
            series,
            changes,
        });
    }
    Ok(reports)
}

/// fetch, report and simulate the reaction network of one molecule
pub fn run_for_molecule<C: HttpClient, R: Rng>(
    kegg: &KeggClient<C>,
    molecule_id: &str,
    settings: &Settings,
    rng: &mut R,
) -> Result<Vec<RunReport>, AppError> {
    let molecule_id = molecule_id.trim();
    let fetched = kegg.fetch_reactions_for_molecule(molecule_id)?;
    fetched.pretty_print(molecule_id);
    if fetched.is_empty() {
        return Ok(Vec::new());
    }

    let batch = parse_reactions(&fetched.reactions);
    if batch.reactions.is_empty() {
        warn!("none of the fetched reactions could be parsed");
        println!("No valid reactions found.");
        return Ok(Vec::new());
    }
    ReactionGraph::from_reactions(&batch.reactions).print_summary(N_HUBS);

    let reports = simulate_concentration_scan(
        &batch.reactions,
        fetched.reactions.len(),
        settings,
        rng,
    )?;
    for report in &reports {
        plot_dynamics(
            &report.series,
            report.initial_concentration,
            &settings.plot_dir,
        )?;
        println!(
            "\nInitial concentration: {:.2}",
            report.initial_concentration
        );
        print_changes_table(&report.changes);
    }
    info!("{} runs finished", reports.len());
    Ok(reports)
}

pub fn read_molecule_id<In: BufRead, Out: Write>(
    input: &mut In,
    output: &mut Out,
) -> Result<String, AppError> {
    write!(output, "{}", PROMPT)?;
    output.flush()?;
    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(line.trim().to_string())
}

pub fn run_interactive(settings: &Settings) -> Result<(), AppError> {
    let stdin = io::stdin();
    let molecule_id = read_molecule_id(&mut stdin.lock(), &mut io::stdout())?;
    let kegg = KeggClient::new(&settings.kegg_base_url);
    let mut rng = make_rng(settings);
    run_for_molecule(&kegg, &molecule_id, settings, &mut rng)?;
    Ok(())
}
