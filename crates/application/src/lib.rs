//! Vigil Application - Harness orchestration
//!
//! This crate defines the transport port and the sequential suite runner
//! that executes smoke checks and owns the append-only result log.

pub mod error;
pub mod harness;
pub mod ports;

pub use error::{ApplicationError, ApplicationResult};
pub use harness::{Check, CheckContext, CheckFuture, RunReport, RunState, Suite, SuiteRunner};
pub use ports::{Transport, TransportError};
