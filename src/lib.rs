//! iDRAC Spray Library
//!
//! This library probes hosts for Dell out-of-band management web interfaces
//! and tries the vendor default credentials against whatever answers.
//!
//! Given a newline-delimited file of host URLs, it fetches each landing
//! page, recognizes the management interface generation (iDRAC 6, iDRAC
//! 7/8, iDRAC 9 or the older BMC web interface), harvests whatever identity
//! details the generation leaks without authentication, and posts the
//! factory default login. Each host produces exactly one result line,
//! emitted as soon as its probe finishes.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//! - [`input`] - Target file parsing, one host URL per line
//! - [`probe`] - Per-host pipeline: page fetch, classification, property
//!   harvest, default credential login
//! - [`dispatch`] - Bounded-concurrency fan-out with completion-order
//!   result delivery
//! - [`report`] - Colored per-host result lines

// Clippy lints - strict for library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod dispatch;
pub mod input;
pub mod probe;
pub mod report;

#[cfg(test)]
pub mod test_support;

pub(crate) mod user_agent;

// Re-export commonly used types
pub use dispatch::{
    AdmissionGate, DEFAULT_CONCURRENCY, DispatchError, DispatchSummary, Dispatcher,
};
pub use input::{Target, TargetList};
pub use probe::{
    AuthStatus, DEFAULT_TIMEOUT_SECS, ProbeClient, ProbeError, ProbeResult, ProductVariant,
    classify, probe,
};
