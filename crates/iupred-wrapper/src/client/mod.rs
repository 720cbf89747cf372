//! Everything that talks to the IUPred3 web service.

pub mod extract;
pub mod http_client;
pub mod orchestrator;

pub use orchestrator::Orchestrator;
