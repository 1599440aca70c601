//! Store metrics published through the `metrics` facade.
//!
//! Nothing is exported unless the embedding application installs a recorder.

pub mod meter;
