//! Interaction network representation and construction

pub mod builder;
pub mod graph;

pub use builder::{build_network, NetworkBuild, NetworkBuilder};
pub use graph::InteractionNetwork;
