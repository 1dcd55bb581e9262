//! Shared helpers for in-crate tests.

pub mod socket_guard;
