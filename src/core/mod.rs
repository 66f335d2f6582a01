//! Core services shared across the crate

pub mod logging;
