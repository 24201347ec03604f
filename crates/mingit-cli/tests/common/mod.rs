//! Shared test harness for mingit-cli integration tests.
//!
//! Provides a process runner for the compiled `mingit` binary plus small
//! fixture helpers.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::process::Command;

/// Captured output from running a command.
pub struct CommandResult {
    pub stdout: Vec<u8>,
    pub stderr: String,
    pub exit_code: i32,
}

impl CommandResult {
    pub fn stdout_str(&self) -> String {
        String::from_utf8_lossy(&self.stdout).into_owned()
    }
}

/// Discover the path to the compiled `mingit` binary.
pub fn mingit_bin() -> PathBuf {
    let mut path = std::env::current_exe()
        .unwrap()
        .parent()
        .unwrap()
        .parent()
        .unwrap()
        .to_path_buf();
    path.push("mingit");
    path
}

/// Run `mingit` in `dir` with the given arguments.
pub fn mingit(dir: &Path, args: &[&str]) -> CommandResult {
    let output = Command::new(mingit_bin())
        .args(args)
        .current_dir(dir)
        .output()
        .expect("failed to run mingit");

    CommandResult {
        stdout: output.stdout,
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        exit_code: output.status.code().unwrap_or(-1),
    }
}

/// Zlib-compress `data` (for planting loose objects by hand).
pub fn deflate(data: &[u8]) -> Vec<u8> {
    use flate2::write::ZlibEncoder;
    use flate2::Compression;
    use std::io::Write;

    let mut out = Vec::new();
    let mut encoder = ZlibEncoder::new(&mut out, Compression::default());
    encoder.write_all(data).unwrap();
    encoder.finish().unwrap();
    out
}

/// Zlib-decompress `data`.
pub fn inflate(data: &[u8]) -> Vec<u8> {
    use flate2::bufread::ZlibDecoder;
    use std::io::Read;

    let mut out = Vec::new();
    ZlibDecoder::new(data).read_to_end(&mut out).unwrap();
    out
}

/// The loose object path for a hex OID under `dir/.git/objects`.
pub fn object_path(dir: &Path, hex: &str) -> PathBuf {
    dir.join(".git/objects").join(&hex[..2]).join(&hex[2..])
}
