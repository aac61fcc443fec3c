use std::fmt;
use std::path::PathBuf;

/// SHA-256 of a file's contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FileDigest([u8; 32]);

impl FileDigest {
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Display for FileDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Paths sharing one digest, in walk order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateGroup {
    pub digest: FileDigest,
    pub paths: Vec<PathBuf>,
}

impl DuplicateGroup {
    pub fn new(digest: FileDigest, first: PathBuf) -> Self {
        Self {
            digest,
            paths: vec![first],
        }
    }

    pub fn is_duplicate(&self) -> bool {
        self.paths.len() > 1
    }

    /// The member that survives deduplication.
    pub fn keeper(&self) -> &PathBuf {
        &self.paths[0]
    }

    pub fn redundant(&self) -> &[PathBuf] {
        &self.paths[1..]
    }
}
