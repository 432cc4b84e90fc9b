//! Core types shared by the AMOC evaluation crates
//!
//! The toolkit is split along the data flow of an AMOC experiment:
//!
//! 1. `amoc-signal` generates labeled synthetic signals
//! 2. `amoc-changepoint` turns a signal into a CUSUM score sequence
//! 3. `amoc-eval` sweeps a decision threshold over many scored signals
//!
//! This crate only carries what all three need: the error type.

pub mod error;

pub use error::{Error, Result};
