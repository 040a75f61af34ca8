//! Vigil Infrastructure - External adapters
//!
//! Implements the application-layer ports against real dependencies;
//! currently the reqwest-backed HTTP transport.

pub mod adapters;

pub use adapters::ReqwestTransport;
