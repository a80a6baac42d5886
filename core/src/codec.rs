//! Digest and compression primitives shared by every object encoding.

use std::io::Write;

use flate2::write::ZlibEncoder;
use flate2::{Compression, Decompress, FlushDecompress, Status};
use sha1::{Digest, Sha1};

use crate::object::{Id, ID_LEN};
use crate::{FormatError, Result};

/// Compute the object ID (SHA-1 digest) of the given bytes.
///
/// Callers normally hash a full envelope; see [`Object::id`](crate::object::Object::id).
pub fn digest(bytes: &[u8]) -> Id {
    let mut hasher = Sha1::new();
    hasher.update(bytes);
    finish(hasher)
}

pub(crate) fn finish(hasher: Sha1) -> Id {
    let mut id = [0u8; ID_LEN];
    id.copy_from_slice(&hasher.finalize()[..]);
    Id::from_digest(id)
}

/// Compress bytes into a zlib stream, as stored in a loose object file.
pub fn compress(bytes: &[u8]) -> Result<Vec<u8>> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(bytes)?;
    Ok(encoder.finish()?)
}

/// Inflate a zlib stream.
///
/// A corrupt or truncated stream is reported as [`FormatError::Compression`].
/// Trailing bytes after the end of the zlib stream are ignored.
pub fn decompress(bytes: &[u8]) -> Result<Vec<u8>> {
    let mut inflater = Decompress::new(true);
    let mut inflated: Vec<u8> = Vec::with_capacity(bytes.len().saturating_mul(2).max(64));

    loop {
        if inflated.len() == inflated.capacity() {
            inflated.reserve(inflated.capacity());
        }

        let consumed = inflater.total_in() as usize;
        let produced = inflated.len();

        let status = inflater
            .decompress_vec(&bytes[consumed..], &mut inflated, FlushDecompress::None)
            .map_err(|err| FormatError::Compression(err.to_string()))?;

        match status {
            Status::StreamEnd => return Ok(inflated),
            Status::Ok | Status::BufError => {
                // Output space was available, so a stall means the input ran out.
                if inflater.total_in() as usize == consumed && inflated.len() == produced {
                    return Err(FormatError::Compression(
                        "unexpected end of compressed stream".to_string(),
                    )
                    .into());
                }
            }
        }
    }
}
