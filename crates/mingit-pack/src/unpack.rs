//! Unpacking a packfile into the loose object store.
//!
//! The pack arrives as one in-memory buffer straight off the upload-pack
//! response. Ingestion is a single sequential walk: base objects are written
//! to the store immediately, reference-deltas are queued and resolved to
//! fixpoint afterwards, offset-deltas are rejected after being consumed.

use std::io::Read;

use flate2::bufread::ZlibDecoder;
use mingit_hash::{Hasher, ObjectId};
use mingit_store::ObjectStore;

use crate::entry::parse_entry_header;
use crate::{
    PackEntryType, PackError, MIN_PACK_SIZE, PACK_HEADER_SIZE, PACK_SIGNATURE, PACK_TRAILER_SIZE,
};

/// A reference-delta whose base was not yet in the store at ingestion time.
#[derive(Debug)]
struct PendingDelta {
    base_oid: ObjectId,
    delta: Vec<u8>,
}

/// Verify the pack envelope: minimum length, trailer checksum, magic,
/// version, object count. Returns the declared object count.
pub fn verify_envelope(pack: &[u8]) -> Result<u32, PackError> {
    if pack.len() < MIN_PACK_SIZE {
        return Err(PackError::InvalidHeader(format!(
            "pack too small: {} bytes",
            pack.len()
        )));
    }

    let (body, trailer) = pack.split_at(pack.len() - PACK_TRAILER_SIZE);
    let expected = ObjectId::from_bytes(trailer)?;
    let actual = Hasher::digest(body)?;
    if actual != expected {
        return Err(PackError::ChecksumMismatch {
            expected: expected.to_hex(),
            actual: actual.to_hex(),
        });
    }

    if &body[0..4] != PACK_SIGNATURE {
        return Err(PackError::InvalidHeader("bad PACK signature".into()));
    }
    let version = u32::from_be_bytes([body[4], body[5], body[6], body[7]]);
    if version != 2 && version != 3 {
        return Err(PackError::UnsupportedVersion(version));
    }

    Ok(u32::from_be_bytes([body[8], body[9], body[10], body[11]]))
}

/// Unpack a complete packfile into the store.
///
/// Validates the envelope, writes every base object, then resolves queued
/// reference-deltas to fixpoint. Returns the number of objects written.
pub fn unpack(store: &ObjectStore, pack: &[u8]) -> Result<usize, PackError> {
    let declared_count = verify_envelope(pack)?;

    // Walk the object records between header and trailer.
    let body = &pack[..pack.len() - PACK_TRAILER_SIZE];
    let mut pos = PACK_HEADER_SIZE;
    let mut objects_read: u32 = 0;
    let mut pending: Vec<PendingDelta> = Vec::new();
    let mut written = 0usize;

    while pos < body.len() {
        objects_read += 1;
        let header = parse_entry_header(&body[pos..], pos)?;
        let entry_offset = pos;
        pos += header.consumed;

        let (data, consumed) = inflate_entry(&body[pos..], entry_offset)?;
        pos += consumed;

        if data.len() != header.size {
            return Err(PackError::InvalidEntry {
                offset: entry_offset,
                reason: format!(
                    "inflated size mismatch: header says {}, got {}",
                    header.size,
                    data.len()
                ),
            });
        }

        match header.entry_type {
            PackEntryType::Commit
            | PackEntryType::Tree
            | PackEntryType::Blob
            | PackEntryType::Tag => {
                let obj_type = header
                    .entry_type
                    .to_object_type()
                    .expect("non-delta entry type");
                store.write_raw(obj_type, &data)?;
                written += 1;
            }
            PackEntryType::RefDelta { base_oid } => {
                pending.push(PendingDelta {
                    base_oid,
                    delta: data,
                });
            }
            PackEntryType::OfsDelta => {
                return Err(PackError::Unsupported(format!(
                    "offset-delta entry at offset {entry_offset}"
                )));
            }
        }
    }

    if objects_read != declared_count {
        return Err(PackError::InvalidHeader(format!(
            "object count mismatch: header says {declared_count}, read {objects_read}"
        )));
    }

    written += resolve_deltas(store, pending)?;
    Ok(written)
}

/// Resolve queued reference-deltas against the store, iterating to fixpoint.
///
/// Each pass resolves every delta whose base is present; deltas chained
/// through other deltas resolve in a later pass. A pass that makes no
/// progress with deltas still queued means a base is missing from both the
/// pack and the store.
fn resolve_deltas(store: &ObjectStore, mut pending: Vec<PendingDelta>) -> Result<usize, PackError> {
    let mut written = 0usize;

    while !pending.is_empty() {
        let mut unresolved = Vec::new();
        let mut progressed = false;

        for item in pending {
            match store.read_raw(&item.base_oid)? {
                Some((base_type, base)) => {
                    let target = crate::delta::apply_delta(&base, &item.delta)?;
                    store.write_raw(base_type, &target)?;
                    written += 1;
                    progressed = true;
                }
                None => unresolved.push(item),
            }
        }

        if !progressed && !unresolved.is_empty() {
            return Err(PackError::UnresolvedDeltas {
                count: unresolved.len(),
            });
        }
        pending = unresolved;
    }

    Ok(written)
}

/// Inflate one zlib stream from the front of `data`, reporting how many
/// compressed bytes were consumed.
fn inflate_entry(data: &[u8], entry_offset: usize) -> Result<(Vec<u8>, usize), PackError> {
    let mut decoder = ZlibDecoder::new(data);
    let mut out = Vec::new();
    decoder
        .read_to_end(&mut out)
        .map_err(|_| PackError::InvalidEntry {
            offset: entry_offset,
            reason: "corrupt deflate stream".into(),
        })?;
    Ok((out, decoder.total_in() as usize))
}
