//! Scenario tests for the shard store.
//!
//! These exercise whole-store properties: distribution, migration on growth,
//! cross-implementation routing vectors and concurrent access.


pub mod support;
