/// Parsing of reversible reaction descriptions coming from the database.
/// Malformed descriptions are dropped with a diagnostic, valid ones become `ParsedReaction`
///
///  # Examples
/// ```
/// use KiNet::Kinetics::reaction_parser::parse_description;
/// let (substrates, products) = parse_description("C00031 + C00002 <=> C00092 + C00008").unwrap();
/// assert_eq!(substrates, vec!["C00031", "C00002"]);
/// assert_eq!(products, vec!["C00092", "C00008"]);
/// ```
pub mod reaction_parser;
/// Dense first-seen numbering of species and padding/truncation of initial concentrations
pub mod species_registry;
/// Flux based right hand side of the ODE system with randomly sampled equilibrium constants
///
///  # Examples
/// ```
/// use KiNet::Kinetics::reaction_parser::{parse_reactions, Reaction};
/// use KiNet::Kinetics::species_registry::SpeciesRegistry;
/// use KiNet::Kinetics::kinetic_model::KineticModel;
/// use rand::SeedableRng;
/// let batch = parse_reactions(&[Reaction::new("R1", "A <=> B")]);
/// let registry = SpeciesRegistry::from_reactions(&batch.reactions);
/// let mut rng = rand::rngs::StdRng::seed_from_u64(0);
/// let model = KineticModel::build(&batch.reactions, &registry, &mut rng);
/// let dydt = model.derivative(0.0, &nalgebra::DVector::from_vec(vec![1.0, 0.0]));
/// assert_eq!(dydt[0], -1.0);
/// ```
pub mod kinetic_model;
/// Directed substrate -> product graph of the reaction network
pub mod reaction_graph;
