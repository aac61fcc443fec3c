use std::fs::File;
use std::io::{self, BufReader};
use std::path::Path;

use sha2::{Digest, Sha256};

use crate::app::{GrabError, Result};
use crate::domain::FileDigest;

/// Stream a file through SHA-256.
pub fn hash_file(path: &Path) -> Result<FileDigest> {
    let hash_failed = |e: io::Error| GrabError::HashFailed {
        path: path.to_path_buf(),
        source: e,
    };

    let file = File::open(path).map_err(hash_failed)?;
    let mut reader = BufReader::new(file);
    let mut hasher = Sha256::new();
    io::copy(&mut reader, &mut hasher).map_err(hash_failed)?;

    Ok(FileDigest::from_bytes(hasher.finalize().into()))
}
