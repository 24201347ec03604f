//! Reference advertisement parsing.
//!
//! The `info/refs` response is a pkt-line stream: a `# service=...`
//! announcement, a flush, then one `"<40-hex-oid> <refname>"` line per ref.
//! The first ref line carries a NUL-separated capability list, which this
//! client discards.

use mingit_hash::ObjectId;

use crate::pktline::{PktLine, PktLineReader};
use crate::ProtocolError;

/// The branch clone asks the remote for.
pub const WANTED_REF: &str = "refs/heads/master";

/// An advertised ref: object id plus full ref name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdvertisedRef {
    pub oid: ObjectId,
    pub name: String,
}

/// Parse a ref advertisement from a pkt-line stream.
///
/// Comment lines (`# service=...`) and empty segments are skipped; flush
/// packets separate sections and do not end parsing until the stream is
/// exhausted.
pub fn parse_advertisement(data: &[u8]) -> Result<Vec<AdvertisedRef>, ProtocolError> {
    let mut reader = PktLineReader::new(data);
    let mut refs = Vec::new();

    // The stream ends at EOF; flushes inside it are section markers.
    while !reader.inner_mut().is_empty() {
        match reader.read_pkt()? {
            PktLine::Flush => continue,
            PktLine::Data(line) => {
                if line.is_empty() || line.starts_with(b"#") {
                    continue;
                }
                refs.push(parse_ref_line(&line)?);
            }
        }
    }

    Ok(refs)
}

/// Parse one `"<40-hex> <refname>"` line, discarding any NUL-separated
/// capability suffix.
fn parse_ref_line(line: &[u8]) -> Result<AdvertisedRef, ProtocolError> {
    let line = match line.iter().position(|&b| b == 0) {
        Some(nul_pos) => &line[..nul_pos],
        None => line,
    };

    let space_pos = line.iter().position(|&b| b == b' ').ok_or_else(|| {
        ProtocolError::Protocol(format!(
            "invalid ref line (no space): {}",
            String::from_utf8_lossy(line)
        ))
    })?;

    let oid_str = std::str::from_utf8(&line[..space_pos])
        .map_err(|_| ProtocolError::Protocol("invalid UTF-8 in OID".into()))?;
    let oid = ObjectId::from_hex(oid_str).map_err(|e| {
        ProtocolError::Protocol(format!("invalid OID in ref advertisement: {}", e))
    })?;

    let name = String::from_utf8(line[space_pos + 1..].to_vec())
        .map_err(|_| ProtocolError::Protocol("invalid UTF-8 in ref name".into()))?;

    Ok(AdvertisedRef { oid, name })
}

/// Select the ref clone wants from the advertisement.
pub fn select_wanted_ref(refs: &[AdvertisedRef]) -> Result<ObjectId, ProtocolError> {
    refs.iter()
        .find(|r| r.name == WANTED_REF)
        .map(|r| r.oid)
        .ok_or_else(|| ProtocolError::RefNotFound(WANTED_REF.into()))
}
