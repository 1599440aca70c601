//! Digest algorithms selectable by name.

use std::fmt;
use std::str::FromStr;

use md5::Md5;
use serde::{Deserialize, Serialize};
use sha1::Sha1;
use sha2::{Digest, Sha256, Sha512};
use xxhash_rust::xxh3::{xxh3_128, xxh3_64};

use crate::error::Error;

/// Digest used for both key and replica-label hashing.
///
/// Every participant that must agree on routing has to use the same algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HashAlgorithm {
    #[default]
    Md5,
    Sha1,
    Sha256,
    Sha512,
    Xxh3,
    Xxh128,
}

impl HashAlgorithm {
    pub const ALL: [HashAlgorithm; 6] = [
        HashAlgorithm::Md5,
        HashAlgorithm::Sha1,
        HashAlgorithm::Sha256,
        HashAlgorithm::Sha512,
        HashAlgorithm::Xxh3,
        HashAlgorithm::Xxh128,
    ];

    /// Canonical lowercase name, as accepted by `from_str` and the config file.
    pub fn name(&self) -> &'static str {
        match self {
            HashAlgorithm::Md5 => "md5",
            HashAlgorithm::Sha1 => "sha1",
            HashAlgorithm::Sha256 => "sha256",
            HashAlgorithm::Sha512 => "sha512",
            HashAlgorithm::Xxh3 => "xxh3",
            HashAlgorithm::Xxh128 => "xxh128",
        }
    }

    /// Digest width in bytes.
    #[cfg(test)]
    pub(crate) fn output_len(&self) -> usize {
        match self {
            HashAlgorithm::Md5 => 16,
            HashAlgorithm::Sha1 => 20,
            HashAlgorithm::Sha256 => 32,
            HashAlgorithm::Sha512 => 64,
            HashAlgorithm::Xxh3 => 8,
            HashAlgorithm::Xxh128 => 16,
        }
    }

    /// Digests `data`, returning the big-endian digest bytes.
    pub fn digest(&self, data: &[u8]) -> Vec<u8> {
        match self {
            HashAlgorithm::Md5 => Md5::digest(data).to_vec(),
            HashAlgorithm::Sha1 => Sha1::digest(data).to_vec(),
            HashAlgorithm::Sha256 => Sha256::digest(data).to_vec(),
            HashAlgorithm::Sha512 => Sha512::digest(data).to_vec(),
            HashAlgorithm::Xxh3 => xxh3_64(data).to_be_bytes().to_vec(),
            HashAlgorithm::Xxh128 => xxh3_128(data).to_be_bytes().to_vec(),
        }
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for HashAlgorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        // Accept the hyphenated spellings used by most digest crates as well.
        let wanted = wanted.replace('-', "");
        HashAlgorithm::ALL
            .into_iter()
            .find(|algo| algo.name() == wanted)
            .ok_or_else(|| Error::InvalidConfiguration(format!("unknown hash algorithm {:?}", s)))
    }
}
