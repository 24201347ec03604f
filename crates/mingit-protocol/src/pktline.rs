//! Pkt-line protocol framing.
//!
//! Each packet is prefixed with a 4-hex-digit length that includes the 4
//! bytes of the length field itself. The special length `0000` is the flush
//! packet, which carries no data and marks the end of a section. A trailing
//! `\n` in a data payload is stripped on read.

use std::io::{Read, Write};

use crate::ProtocolError;

/// Maximum data per packet (65520 - 4 = 65516).
pub const MAX_PKT_DATA_LEN: usize = 65516;

/// One parsed pkt-line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PktLine {
    /// Normal data line (trailing newline already stripped).
    Data(Vec<u8>),
    /// Flush packet (0000) — end of section.
    Flush,
}

/// Pkt-line reader over any byte stream.
pub struct PktLineReader<R> {
    reader: R,
}

impl<R: Read> PktLineReader<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }

    /// Get a mutable reference to the inner reader.
    pub fn inner_mut(&mut self) -> &mut R {
        &mut self.reader
    }

    /// Consume the reader and return the inner value.
    pub fn into_inner(self) -> R {
        self.reader
    }

    /// Read one pkt-line.
    pub fn read_pkt(&mut self) -> Result<PktLine, ProtocolError> {
        let mut len_buf = [0u8; 4];
        self.reader.read_exact(&mut len_buf).map_err(|e| {
            if e.kind() == std::io::ErrorKind::UnexpectedEof {
                ProtocolError::Protocol("unexpected EOF reading pkt-line length".into())
            } else {
                ProtocolError::Io(e)
            }
        })?;

        let len_str = std::str::from_utf8(&len_buf).map_err(|_| {
            ProtocolError::InvalidPktLine(format!("invalid pkt-line length bytes: {:?}", len_buf))
        })?;
        let len = u16::from_str_radix(len_str, 16).map_err(|_| {
            ProtocolError::InvalidPktLine(format!("invalid pkt-line length: {:?}", len_str))
        })?;

        match len {
            0 => Ok(PktLine::Flush),
            1..=3 => Err(ProtocolError::InvalidPktLine(format!(
                "pkt-line length {} is invalid (minimum data packet is 4)",
                len
            ))),
            _ => {
                let data_len = (len as usize) - 4;
                if data_len > MAX_PKT_DATA_LEN {
                    return Err(ProtocolError::InvalidPktLine(format!(
                        "pkt-line too long: {} bytes",
                        data_len
                    )));
                }
                let mut data = vec![0u8; data_len];
                self.reader.read_exact(&mut data).map_err(|e| {
                    if e.kind() == std::io::ErrorKind::UnexpectedEof {
                        ProtocolError::Protocol("truncated pkt-line data".into())
                    } else {
                        ProtocolError::Io(e)
                    }
                })?;
                if data.last() == Some(&b'\n') {
                    data.pop();
                }
                Ok(PktLine::Data(data))
            }
        }
    }

    /// Read one data line. Returns `None` for a flush packet.
    pub fn read_line(&mut self) -> Result<Option<Vec<u8>>, ProtocolError> {
        match self.read_pkt()? {
            PktLine::Data(data) => Ok(Some(data)),
            PktLine::Flush => Ok(None),
        }
    }

    /// Read all data lines until a flush packet.
    pub fn read_until_flush(&mut self) -> Result<Vec<Vec<u8>>, ProtocolError> {
        let mut lines = Vec::new();
        while let PktLine::Data(data) = self.read_pkt()? {
            lines.push(data);
        }
        Ok(lines)
    }
}

/// Pkt-line writer over any byte sink.
pub struct PktLineWriter<W> {
    writer: W,
}

impl<W: Write> PktLineWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Consume the writer and return the inner value.
    pub fn into_inner(self) -> W {
        self.writer
    }

    /// Write a data packet. The payload is framed unmodified.
    pub fn write_line(&mut self, data: &[u8]) -> Result<(), ProtocolError> {
        if data.len() > MAX_PKT_DATA_LEN {
            return Err(ProtocolError::InvalidPktLine(format!(
                "data too long for pkt-line: {} bytes (max {})",
                data.len(),
                MAX_PKT_DATA_LEN
            )));
        }

        let len = (data.len() + 4) as u16;
        write!(self.writer, "{:04x}", len)?;
        self.writer.write_all(data)?;
        Ok(())
    }

    /// Write a text line, appending `\n` if not present.
    pub fn write_text(&mut self, text: &str) -> Result<(), ProtocolError> {
        if text.ends_with('\n') {
            self.write_line(text.as_bytes())
        } else {
            let mut data = text.as_bytes().to_vec();
            data.push(b'\n');
            self.write_line(&data)
        }
    }

    /// Write a flush packet (0000).
    pub fn write_flush(&mut self) -> Result<(), ProtocolError> {
        self.writer.write_all(b"0000")?;
        Ok(())
    }

    /// Flush the underlying writer.
    pub fn flush(&mut self) -> Result<(), ProtocolError> {
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn write_and_read_data_line() {
        let mut buf = Vec::new();
        {
            let mut writer = PktLineWriter::new(&mut buf);
            writer.write_line(b"hello").unwrap();
        }
        assert_eq!(&buf, b"0009hello");

        let mut reader = PktLineReader::new(Cursor::new(buf));
        assert_eq!(reader.read_line().unwrap().unwrap(), b"hello");
    }

    #[test]
    fn text_line_gets_newline_framed() {
        let mut buf = Vec::new();
        {
            let mut writer = PktLineWriter::new(&mut buf);
            writer.write_text("hello").unwrap();
        }
        // "hello\n" is 6 bytes, + 4 = 10 = 000a
        assert_eq!(&buf, b"000ahello\n");

        // ...and the newline is stripped again on read.
        let mut reader = PktLineReader::new(Cursor::new(buf));
        assert_eq!(reader.read_line().unwrap().unwrap(), b"hello");
    }

    #[test]
    fn flush_roundtrip() {
        let mut buf = Vec::new();
        {
            let mut writer = PktLineWriter::new(&mut buf);
            writer.write_flush().unwrap();
        }
        assert_eq!(&buf, b"0000");

        let mut reader = PktLineReader::new(Cursor::new(buf));
        assert_eq!(reader.read_pkt().unwrap(), PktLine::Flush);
    }

    #[test]
    fn upload_pack_request_parses_into_three_pkts() {
        // The exact byte sequence clone sends: want line, flush, done.
        let oid = "ce013625030ba8dba906f756967f9e9ca394464a";
        let data = format!("0032want {oid}\n00000009done\n");
        let mut reader = PktLineReader::new(Cursor::new(data.into_bytes()));

        assert_eq!(
            reader.read_pkt().unwrap(),
            PktLine::Data(format!("want {oid}").into_bytes())
        );
        assert_eq!(reader.read_pkt().unwrap(), PktLine::Flush);
        assert_eq!(reader.read_pkt().unwrap(), PktLine::Data(b"done".to_vec()));
    }

    #[test]
    fn read_until_flush_collects_section() {
        let data = b"000ahello\n000bworld!\n0000";
        let mut reader = PktLineReader::new(Cursor::new(&data[..]));
        let lines = reader.read_until_flush().unwrap();
        assert_eq!(lines, vec![b"hello".to_vec(), b"world!".to_vec()]);
    }

    #[test]
    fn empty_data_line() {
        // Length 4 = 0004, meaning 0 bytes of data.
        let data = b"0004";
        let mut reader = PktLineReader::new(Cursor::new(&data[..]));
        assert_eq!(reader.read_line().unwrap().unwrap(), b"");
    }

    #[test]
    fn malformed_length_fails() {
        let data = b"00zz....";
        let mut reader = PktLineReader::new(Cursor::new(&data[..]));
        assert!(matches!(
            reader.read_pkt().unwrap_err(),
            ProtocolError::InvalidPktLine(_)
        ));
    }

    #[test]
    fn reserved_short_lengths_fail() {
        for prefix in ["0001", "0002", "0003"] {
            let mut reader = PktLineReader::new(Cursor::new(prefix.as_bytes().to_vec()));
            assert!(matches!(
                reader.read_pkt().unwrap_err(),
                ProtocolError::InvalidPktLine(_)
            ));
        }
    }

    #[test]
    fn truncated_data_fails() {
        let data = b"0032want ce0136";
        let mut reader = PktLineReader::new(Cursor::new(&data[..]));
        assert!(reader.read_pkt().is_err());
    }

    #[test]
    fn truncated_length_fails() {
        let data = b"00";
        let mut reader = PktLineReader::new(Cursor::new(&data[..]));
        assert!(reader.read_pkt().is_err());
    }

    #[test]
    fn oversized_line_rejected_on_write() {
        let mut buf = Vec::new();
        let mut writer = PktLineWriter::new(&mut buf);
        let big = vec![b'x'; MAX_PKT_DATA_LEN + 1];
        assert!(writer.write_line(&big).is_err());
    }

    #[test]
    fn max_size_payload_roundtrip() {
        let payload = vec![b'x'; MAX_PKT_DATA_LEN];
        let mut buf = Vec::new();
        {
            let mut writer = PktLineWriter::new(&mut buf);
            writer.write_line(&payload).unwrap();
        }
        let mut reader = PktLineReader::new(Cursor::new(buf));
        // Payload of all 'x' has no trailing newline to strip.
        assert_eq!(reader.read_line().unwrap().unwrap(), payload);
    }
}
