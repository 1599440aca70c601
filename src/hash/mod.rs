//! Projection of labels and keys into the unit hash space `[0, 1)`.

pub mod algorithm;
pub mod hasher;


pub use algorithm::HashAlgorithm;
pub use hasher::{KeyHasher, DEFAULT_BOUNDARY};
