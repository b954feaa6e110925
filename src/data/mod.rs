//! Input file ingestion

pub mod interactions;
pub mod seed_list;

pub use interactions::{load_interactions, InteractionRecord};
pub use seed_list::load_seed_genes;
