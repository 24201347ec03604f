use std::fs;
use std::io::Read;

use flate2::bufread::ZlibDecoder;
use mingit_hash::ObjectId;
use mingit_object::{header, Object, ObjectType};

use crate::{ObjectStore, StoreError};

impl ObjectStore {
    /// Check if an object exists in the store.
    pub fn contains(&self, oid: &ObjectId) -> bool {
        self.object_path(oid).is_file()
    }

    /// Read an object's raw payload and type by OID.
    ///
    /// Returns `Ok(None)` if the object does not exist, `Err` if it exists
    /// but is corrupt. The declared header size must match the payload
    /// length exactly.
    pub fn read_raw(&self, oid: &ObjectId) -> Result<Option<(ObjectType, Vec<u8>)>, StoreError> {
        let path = self.object_path(oid);
        let compressed = match fs::read(&path) {
            Ok(data) => data,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(StoreError::Io(e)),
        };

        let decompressed = decompress_all(&compressed, oid)?;
        let (obj_type, declared_size, header_len) = header::parse_header(&decompressed)?;
        let payload = &decompressed[header_len..];
        if payload.len() != declared_size {
            return Err(StoreError::Corrupt {
                oid: oid.to_hex(),
                reason: format!(
                    "size mismatch: header says {declared_size}, payload is {}",
                    payload.len()
                ),
            });
        }

        Ok(Some((obj_type, payload.to_vec())))
    }

    /// Read and parse an object by OID.
    ///
    /// Returns `Ok(None)` if the object does not exist.
    pub fn read(&self, oid: &ObjectId) -> Result<Option<Object>, StoreError> {
        match self.read_raw(oid)? {
            Some((obj_type, payload)) => Ok(Some(Object::parse(obj_type, &payload)?)),
            None => Ok(None),
        }
    }
}

/// Zlib-decompress the full contents of a loose object file.
fn decompress_all(compressed: &[u8], oid: &ObjectId) -> Result<Vec<u8>, StoreError> {
    let mut decoder = ZlibDecoder::new(compressed);
    let mut decompressed = Vec::new();
    decoder
        .read_to_end(&mut decompressed)
        .map_err(|e| StoreError::Decompress {
            oid: oid.to_hex(),
            source: e,
        })?;
    Ok(decompressed)
}
