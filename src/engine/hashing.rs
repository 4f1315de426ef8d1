//! File fingerprinting

use anyhow::Result;
use sha1::{Digest, Sha1};
use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::utils::config::HASH_READ_CHUNK_SIZE;

/// Hash a file with SHA-1, streaming fixed-size chunks until EOF. Returns the
/// hex-encoded digest. The whole file is never buffered; the digest is a
/// change-detection key, not a security boundary. I/O errors propagate.
pub fn hash_file(path: &Path) -> Result<String> {
    let mut file = File::open(path)?;
    let mut hasher = Sha1::new();
    let mut buffer = [0u8; HASH_READ_CHUNK_SIZE];
    loop {
        let n = file.read(&mut buffer)?;
        if n == 0 {
            break;
        }
        hasher.update(&buffer[..n]);
    }
    Ok(hex::encode(hasher.finalize()))
}
