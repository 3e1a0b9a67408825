//! Execution of hurl scripts through the external `hurl` binary.
//!
//! [`subprocess`] owns spawning and output capture, [`executor`] the output
//! types and the rule for combining the two streams, and [`hurl`] the
//! invocations of the binary itself (test runs and the version probe).

pub mod executor;
pub mod hurl;
pub mod subprocess;
