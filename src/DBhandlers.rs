/// Lookup of reactions in the KEGG database.
/// KEGG answers `find/reaction/<molecule>` with lines `<reaction_id>\t<description>`
pub mod kegg_api;
mod kegg_api_tests;
