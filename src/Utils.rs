/// SVG plots of simulated concentration profiles
pub mod plots;
