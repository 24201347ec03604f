//! Blocking HTTP via a `curl` subprocess.
//!
//! The smart-HTTP client needs exactly two requests per clone, so a
//! subprocess keeps the dependency surface flat. `-f` makes curl exit
//! non-zero on HTTP error statuses, which surfaces as a request failure.

use std::io::Write as _;
use std::process::{Command, Stdio};

use crate::ProtocolError;

/// Perform a GET and return the response body.
pub fn get(url: &str) -> Result<Vec<u8>, ProtocolError> {
    let output = Command::new("curl")
        .args(["-sf", url])
        .output()
        .map_err(|e| ProtocolError::Http(format!("failed to run curl: {e}")))?;

    if !output.status.success() {
        return Err(ProtocolError::Http(format!(
            "GET {} failed: {}",
            url,
            String::from_utf8_lossy(&output.stderr).trim()
        )));
    }

    Ok(output.stdout)
}

/// Perform a POST with the given content type and body; return the response
/// body.
pub fn post(url: &str, content_type: &str, body: &[u8]) -> Result<Vec<u8>, ProtocolError> {
    let mut child = Command::new("curl")
        .args([
            "-sf",
            "-X",
            "POST",
            "-H",
            &format!("Content-Type: {content_type}"),
            "--data-binary",
            "@-",
            url,
        ])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| ProtocolError::Http(format!("failed to run curl: {e}")))?;

    if let Some(ref mut stdin) = child.stdin {
        stdin.write_all(body)?;
    }
    drop(child.stdin.take());

    let output = child.wait_with_output()?;

    if !output.status.success() {
        return Err(ProtocolError::Http(format!(
            "POST {} failed: {}",
            url,
            String::from_utf8_lossy(&output.stderr).trim()
        )));
    }

    Ok(output.stdout)
}
