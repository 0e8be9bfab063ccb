//! # Input Module
//!
//! Loads the list of profiles to process.
//!
//! The input is a JSON array of objects with an `id` and a
//! `profile_image_url`. Any failure here is fatal: the run stops before a
//! single request is made.

use crate::error::InputError;
use serde::{Deserialize, Serialize};
use std::io::Read;
use std::path::Path;

/// One profile whose image should be hashed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileRecord {
    /// Profile identifier, reported back to the API as-is
    pub id: String,
    /// Where to download the profile image from
    #[serde(rename = "profile_image_url")]
    pub image_url: String,
}

impl ProfileRecord {
    pub fn new(id: impl Into<String>, image_url: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            image_url: image_url.into(),
        }
    }
}

/// Load profile records from a JSON file
pub fn load_profiles(path: &Path) -> Result<Vec<ProfileRecord>, InputError> {
    let file = std::fs::File::open(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => InputError::NotFound {
            path: path.to_path_buf(),
        },
        _ => InputError::Read {
            path: path.to_path_buf(),
            source: e,
        },
    })?;

    let records = parse_profiles(std::io::BufReader::new(file), path)?;
    tracing::info!(count = records.len(), path = %path.display(), "Loaded profiles");
    Ok(records)
}

/// Parse profile records from any reader. `origin` is only used in errors.
pub fn parse_profiles<R: Read>(reader: R, origin: &Path) -> Result<Vec<ProfileRecord>, InputError> {
    serde_json::from_reader(reader).map_err(|e| {
        if e.is_io() {
            InputError::Read {
                path: origin.to_path_buf(),
                source: e.into(),
            }
        } else {
            InputError::InvalidJson {
                path: origin.to_path_buf(),
                source: e,
            }
        }
    })
}
