//! Packfile reading and unpacking.
//!
//! A pack file contains a 12-byte header, a sequence of compressed objects
//! (possibly deltified), and a trailing SHA-1 checksum. This crate validates
//! the envelope, iterates the object records, and writes every object into
//! the loose store, reconstructing reference-deltas against bases already
//! stored.

pub mod delta;
pub mod entry;
pub mod unpack;

use mingit_hash::ObjectId;
use mingit_object::ObjectType;

/// Errors that can occur during pack operations.
#[derive(Debug, thiserror::Error)]
pub enum PackError {
    #[error("invalid pack header: {0}")]
    InvalidHeader(String),

    #[error("invalid pack entry at offset {offset}: {reason}")]
    InvalidEntry { offset: usize, reason: String },

    #[error("invalid delta: {0}")]
    InvalidDelta(String),

    #[error("pack checksum mismatch: expected {expected}, got {actual}")]
    ChecksumMismatch { expected: String, actual: String },

    #[error("unsupported pack entry: {0}")]
    Unsupported(String),

    #[error("unresolvable deltas: {count} deltas reference bases not in the pack or store")]
    UnresolvedDeltas { count: usize },

    #[error("unsupported pack version: {0}")]
    UnsupportedVersion(u32),

    #[error(transparent)]
    Store(#[from] mingit_store::StoreError),

    #[error(transparent)]
    Hash(#[from] mingit_hash::HashError),
}

/// Type of a packed object entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackEntryType {
    Commit,
    Tree,
    Blob,
    Tag,
    /// Delta whose base is located by offset within the same pack.
    OfsDelta,
    /// Delta referencing its base by OID.
    RefDelta { base_oid: ObjectId },
}

impl PackEntryType {
    /// Convert a non-delta pack entry type to an ObjectType.
    pub fn to_object_type(self) -> Option<ObjectType> {
        match self {
            Self::Commit => Some(ObjectType::Commit),
            Self::Tree => Some(ObjectType::Tree),
            Self::Blob => Some(ObjectType::Blob),
            Self::Tag => Some(ObjectType::Tag),
            Self::OfsDelta | Self::RefDelta { .. } => None,
        }
    }
}

/// Pack format constants.
pub const PACK_SIGNATURE: &[u8; 4] = b"PACK";
pub const PACK_HEADER_SIZE: usize = 12;
pub const PACK_TRAILER_SIZE: usize = 20;
/// The smallest possible pack: header plus trailer.
pub const MIN_PACK_SIZE: usize = 32;
