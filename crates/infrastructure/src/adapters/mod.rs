//! Adapter implementations.

mod reqwest_transport;

pub use reqwest_transport::ReqwestTransport;
