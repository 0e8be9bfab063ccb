//! # Hasher Module
//!
//! Computes perceptual hashes for downloaded images.
//!
//! ## How It Works
//! 1. Sniff the format from the magic bytes and decode
//! 2. Downsample and convert to grayscale
//! 3. Apply a DCT and keep the low-frequency block
//! 4. Threshold each coefficient against the mean to get one bit
//!
//! Hashes are rendered as 16 lowercase hex characters. Two similar images
//! give hashes with a small Hamming distance.
//!
//! ## Example
//! ```rust,ignore
//! use profile_phash_worker::core::hasher::{HashAlgorithm, PerceptualHash, PerceptualHasher};
//!
//! let hash = PerceptualHasher::default().hash_bytes(&bytes)?;
//! println!("{}", hash.to_hex());
//! ```

mod decode;
mod perceptual;
mod traits;

pub use decode::ImageDecoder;
pub use perceptual::{PerceptualHasher, PHASH_SIZE};
pub use traits::{HashAlgorithm, ImageHashValue, PerceptualHash};
