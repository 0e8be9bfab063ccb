//! Trait definitions for perceptual hashing.

use super::decode::ImageDecoder;
use crate::error::HashError;
use image::DynamicImage;
use serde::{Deserialize, Serialize};

/// A computed perceptual hash that can be compared
pub trait PerceptualHash: Clone + Send + Sync {
    /// Compute the Hamming distance to another hash
    ///
    /// Returns the number of bits that differ between the two hashes.
    /// Bytes present in only one hash count as eight differing bits.
    /// Lower distance = more similar images.
    fn distance(&self, other: &Self) -> u32;

    /// Get the raw hash bytes
    fn as_bytes(&self) -> &[u8];

    /// Get the hash as a lowercase hexadecimal string
    fn to_hex(&self) -> String {
        self.as_bytes()
            .iter()
            .map(|b| format!("{:02x}", b))
            .collect()
    }

    /// Get the total number of bits in this hash
    fn bit_count(&self) -> u32 {
        (self.as_bytes().len() * 8) as u32
    }

    /// Calculate similarity as a percentage (0-100)
    fn similarity(&self, other: &Self) -> f64 {
        let distance = self.distance(other);
        let max_distance = self.bit_count().max(other.bit_count());
        if max_distance == 0 {
            return 100.0;
        }
        (1.0 - (distance as f64 / max_distance as f64)) * 100.0
    }
}

/// Trait for hash algorithm implementations
pub trait HashAlgorithm: Send + Sync {
    /// Compute a hash from an already-decoded image
    fn hash_image(&self, image: &DynamicImage) -> Result<ImageHashValue, HashError>;

    /// Decode downloaded bytes and hash them
    fn hash_bytes(&self, bytes: &[u8]) -> Result<ImageHashValue, HashError> {
        let image = ImageDecoder::decode(bytes)?;
        self.hash_image(&image)
    }
}

/// Concrete hash value type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageHashValue {
    bytes: Vec<u8>,
}

impl ImageHashValue {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    /// Parse a hash previously rendered with [`PerceptualHash::to_hex`]
    pub fn from_hex(hex: &str) -> Result<Self, HashError> {
        if hex.len() % 2 != 0 {
            return Err(HashError::ComputationFailed(format!(
                "hex hash has odd length: {}",
                hex
            )));
        }

        let bytes = (0..hex.len())
            .step_by(2)
            .map(|i| {
                hex.get(i..i + 2)
                    .and_then(|pair| u8::from_str_radix(pair, 16).ok())
                    .ok_or_else(|| {
                        HashError::ComputationFailed(format!("invalid hex hash: {}", hex))
                    })
            })
            .collect::<Result<Vec<u8>, HashError>>()?;

        Ok(Self { bytes })
    }
}

impl PerceptualHash for ImageHashValue {
    fn distance(&self, other: &Self) -> u32 {
        // Hamming distance: count differing bits; bytes past the shorter
        // hash count as fully differing
        let shared: u32 = self
            .bytes
            .iter()
            .zip(other.bytes.iter())
            .map(|(a, b)| (a ^ b).count_ones())
            .sum();
        let extra = self.bytes.len().abs_diff(other.bytes.len()) as u32;
        shared + extra * 8
    }

    fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl std::fmt::Display for ImageHashValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}
