//! Script run orchestration.
//!
//! The [`RunOrchestrator`](orchestrator::RunOrchestrator) ties the core
//! hurl executor to the job store and owns background dispatch.

pub mod orchestrator;
