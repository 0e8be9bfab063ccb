//! Perceptual Hash (pHash) implementation.
//!
//! pHash uses the Discrete Cosine Transform (DCT) to extract
//! frequency information from the image. This makes it robust to:
//! - Scaling
//! - Brightness/contrast changes
//! - Compression artifacts
//!
//! The image is downsampled, DCT-transformed, and the low-frequency
//! coefficients are thresholded against their mean. We use the
//! image_hasher crate which provides a well-tested implementation.

use super::traits::{HashAlgorithm, ImageHashValue};
use crate::error::HashError;
use image::DynamicImage;
use image_hasher::{HashAlg, HasherConfig as ImageHasherConfig};

/// Side length of the hash grid. 8x8 = 64 bits = 16 hex characters.
pub const PHASH_SIZE: u32 = 8;

/// Perceptual Hash (pHash) implementation using DCT
pub struct PerceptualHasher {
    hash_size: u32,
    hasher: image_hasher::Hasher,
}

impl PerceptualHasher {
    /// Create a new pHash hasher
    pub fn new(hash_size: u32) -> Self {
        let hasher = ImageHasherConfig::new()
            .hash_size(hash_size, hash_size)
            .hash_alg(HashAlg::Mean)
            .preproc_dct()
            .to_hasher();

        Self { hash_size, hasher }
    }

    /// Number of hex characters in every hash this hasher produces
    pub fn hex_len(&self) -> usize {
        (self.hash_size * self.hash_size / 4) as usize
    }
}

impl Default for PerceptualHasher {
    fn default() -> Self {
        Self::new(PHASH_SIZE)
    }
}

impl HashAlgorithm for PerceptualHasher {
    fn hash_image(&self, image: &DynamicImage) -> Result<ImageHashValue, HashError> {
        if image.width() == 0 || image.height() == 0 {
            return Err(HashError::EmptyImage);
        }

        let hash = self.hasher.hash_image(image);
        let bytes = hash.as_bytes().to_vec();

        if bytes.is_empty() {
            return Err(HashError::ComputationFailed(
                "hasher produced no bits".to_string(),
            ));
        }

        Ok(ImageHashValue::new(bytes))
    }
}
