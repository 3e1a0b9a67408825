//! Domain logic for the hurl run service.
//!
//! Everything here is free of HTTP concerns: invoking the external hurl
//! binary, capturing its output, and the filesystem-backed job store that
//! holds scripts and results for asynchronous runs.

pub mod error;
pub mod jobs;
pub mod scripting;
pub mod types;
