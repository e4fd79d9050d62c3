//! Streaming BLAKE3 content hasher.
//!
//! # Overview
//!
//! Computes a 256-bit cryptographic digest over a file's entire byte
//! content, reading in fixed-size chunks so peak memory stays bounded
//! regardless of file size. The digest is deterministic across runs and
//! processes: equal bytes always produce equal hashes, and the collision
//! probability between differing files is negligible at any realistic
//! filesystem scale.
//!
//! # Example
//!
//! ```no_run
//! use dupescan::scanner::{hash_to_hex, Hasher};
//! use std::path::Path;
//!
//! let hasher = Hasher::new();
//! let digest = hasher.hash_file(Path::new("/etc/hosts")).unwrap();
//! println!("{}", hash_to_hex(&digest));
//! ```

use std::fs::File;
use std::io::Read;
use std::path::Path;

use super::{read_error_from_io, ReadError};

/// A 256-bit BLAKE3 content hash.
pub type Hash = [u8; 32];

/// Read chunk size for streaming hashing (64 KiB).
pub const CHUNK_SIZE: usize = 64 * 1024;

/// Streaming file hasher.
#[derive(Debug, Clone)]
pub struct Hasher {
    chunk_size: usize,
}

impl Default for Hasher {
    fn default() -> Self {
        Self::new()
    }
}

impl Hasher {
    /// Create a hasher with the default chunk size.
    #[must_use]
    pub fn new() -> Self {
        Self {
            chunk_size: CHUNK_SIZE,
        }
    }

    /// Override the read chunk size (minimum 1 byte).
    ///
    /// The digest is independent of the chunk size; this only affects how
    /// much is read per syscall.
    #[must_use]
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size.max(1);
        self
    }

    /// Hash the entire content of the file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`ReadError`] if the file cannot be opened or any read fails
    /// mid-stream (permission revoked, file truncated, device error). The
    /// partial digest state is discarded on failure.
    pub fn hash_file(&self, path: &Path) -> Result<Hash, ReadError> {
        let mut file = File::open(path).map_err(|e| read_error_from_io(path, e))?;
        let mut hasher = blake3::Hasher::new();
        let mut buffer = vec![0u8; self.chunk_size];

        loop {
            let read = match file.read(&mut buffer) {
                Ok(0) => break,
                Ok(n) => n,
                Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(read_error_from_io(path, e)),
            };
            hasher.update(&buffer[..read]);
        }

        Ok(*hasher.finalize().as_bytes())
    }
}

/// Render a hash as a lowercase hexadecimal string (64 characters).
#[must_use]
pub fn hash_to_hex(hash: &Hash) -> String {
    let mut hex = String::with_capacity(64);
    for byte in hash {
        use std::fmt::Write;
        let _ = write!(hex, "{byte:02x}");
    }
    hex
}
