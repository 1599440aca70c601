//! Digest-to-unit-interval normalizer.

use crate::error::{Error, Result};

use super::HashAlgorithm;

/// Default reduction boundary, kept for positions comparable with existing deployments.
pub const DEFAULT_BOUNDARY: f64 = 1e7;

/// Maps arbitrary labels onto the circular hash space `[0, 1)`.
///
/// The digest is read as a big-endian unsigned integer, rounded to the nearest
/// `f64`, reduced modulo `boundary` and divided by it. Rounding before the
/// reduction is part of the contract: positions must match other implementations
/// that hash the same labels with the same algorithm and boundary.
///
/// Distinct labels can collide; the boundary only makes it rare.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeyHasher {
    algorithm: HashAlgorithm,
    boundary: f64,
}

impl KeyHasher {
    /// Creates a hasher, rejecting boundaries that are not finite or below 1.
    pub fn new(algorithm: HashAlgorithm, boundary: f64) -> Result<Self> {
        if !boundary.is_finite() || boundary < 1.0 {
            return Err(Error::InvalidConfiguration(format!(
                "hash boundary must be a finite number >= 1, got {}",
                boundary
            )));
        }
        Ok(Self { algorithm, boundary })
    }

    /// Hasher with the default boundary.
    pub fn with_algorithm(algorithm: HashAlgorithm) -> Self {
        Self {
            algorithm,
            boundary: DEFAULT_BOUNDARY,
        }
    }

    pub fn algorithm(&self) -> HashAlgorithm {
        self.algorithm
    }

    pub fn boundary(&self) -> f64 {
        self.boundary
    }

    /// Position of `label` in `[0, 1)`.
    #[inline]
    pub fn normalized(&self, label: &str) -> f64 {
        let value = digest_to_f64(&self.algorithm.digest(label.as_bytes()));
        (value % self.boundary) / self.boundary
    }
}

impl Default for KeyHasher {
    fn default() -> Self {
        Self::with_algorithm(HashAlgorithm::default())
    }
}

/// Rounds a big-endian unsigned integer of any width to the nearest `f64`
/// (ties to even).
pub(crate) fn digest_to_f64(digest: &[u8]) -> f64 {
    let start = digest.iter().position(|b| *b != 0).unwrap_or(digest.len());
    let significant = &digest[start..];

    if significant.len() <= 16 {
        let mut buf = [0u8; 16];
        buf[16 - significant.len()..].copy_from_slice(significant);
        return u128::from_be_bytes(buf) as f64;
    }

    let (head, tail) = significant.split_at(16);
    let mut buf = [0u8; 16];
    buf.copy_from_slice(head);
    let mut top = u128::from_be_bytes(buf);
    // head starts with a non-zero byte, so bit 0 sits far below the rounding
    // position and can carry the sticky bit for the discarded tail.
    if tail.iter().any(|b| *b != 0) {
        top |= 1;
    }
    let shift = 8 * tail.len() as i32;
    top as f64 * 2f64.powi(shift)
}
