//! Statistical scoring for the propagation engine

pub mod hypergeom;

pub use hypergeom::HypergeomScorer;
