//! SHA-1 hashing and object identity for mingit.
//!
//! Provides the core `ObjectId` type, streaming hash computation, and the
//! hex encoding/decoding used for object paths and wire formats.

mod error;
pub mod hasher;
pub mod hex;
mod oid;

pub use error::HashError;
pub use hasher::Hasher;
pub use oid::ObjectId;
