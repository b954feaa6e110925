//! Core library functions for DIAMOnD-style disease module discovery

pub mod config;
pub mod data;
pub mod error;
pub mod network;
pub mod pipeline;
pub mod propagation;
pub mod report;
pub mod seeds;
pub mod stats;

pub use anyhow::{Result, anyhow};
