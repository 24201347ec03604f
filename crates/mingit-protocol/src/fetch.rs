//! The two smart-HTTP exchanges behind `clone`: reference discovery and the
//! upload-pack request that returns a packfile.

use mingit_hash::ObjectId;

use crate::pktline::{PktLineReader, PktLineWriter};
use crate::refs::{parse_advertisement, select_wanted_ref};
use crate::{http, ProtocolError};

/// Discover the remote's refs and pick the commit clone wants.
pub fn discover(remote_url: &str) -> Result<ObjectId, ProtocolError> {
    let url = format!("{}/info/refs?service=git-upload-pack", remote_url);
    let body = http::get(&url)?;
    let refs = parse_advertisement(&body)?;
    select_wanted_ref(&refs)
}

/// Request a packfile containing everything reachable from `want`.
///
/// The request body is the literal framing
/// `"0032want <hash>\n00000009done\n"`; the response starts with one
/// pkt-line (`NAK`), which is consumed, leaving the raw packfile.
pub fn request_pack(remote_url: &str, want: &ObjectId) -> Result<Vec<u8>, ProtocolError> {
    let body = upload_pack_request(want)?;
    let url = format!("{}/git-upload-pack", remote_url);
    let response = http::post(&url, "application/x-git-upload-pack-request", &body)?;

    let mut reader = PktLineReader::new(response.as_slice());
    reader.read_pkt()?;
    Ok(reader.into_inner().to_vec())
}

/// Fetch the wanted commit's packfile from a remote in one call.
///
/// Returns the raw packfile bytes and the commit id of
/// `refs/heads/master`.
pub fn fetch_pack(remote_url: &str) -> Result<(Vec<u8>, ObjectId), ProtocolError> {
    let want = discover(remote_url)?;
    let pack = request_pack(remote_url, &want)?;
    Ok((pack, want))
}

/// Build the upload-pack request body for one wanted commit.
fn upload_pack_request(want: &ObjectId) -> Result<Vec<u8>, ProtocolError> {
    let mut body = Vec::new();
    let mut writer = PktLineWriter::new(&mut body);
    writer.write_text(&format!("want {}", want.to_hex()))?;
    writer.write_flush()?;
    writer.write_text("done")?;
    debug_assert_eq!(
        body,
        format!("0032want {}\n00000009done\n", want.to_hex()).into_bytes()
    );
    Ok(body)
}
