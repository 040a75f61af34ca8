//! Vigil - API smoke-test harness
//!
//! Library surface of the CLI: the concrete smoke-check suite for the
//! listing-optimization API, and the console report renderer. The binary in
//! `main.rs` wires these onto the reqwest transport.

pub mod checks;
pub mod report;
pub mod suite;
