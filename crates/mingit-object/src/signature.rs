use bstr::{BStr, BString, ByteSlice};

use crate::ObjectError;

/// An author or committer identity with timestamp.
///
/// Serialized as `"<name> <<email>> <seconds> <tz>"`, e.g.
/// `"Jane Doe <jane@example.com> 1234567890 +0000"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature {
    pub name: BString,
    pub email: BString,
    /// Seconds since the Unix epoch.
    pub timestamp: i64,
    /// Timezone offset as written, e.g. `"+0000"` or `"-0700"`.
    pub tz: BString,
}

impl Signature {
    /// The fixed identity used by `commit-tree` so commit ids are stable.
    pub fn placeholder() -> Self {
        Self {
            name: BString::from("mingit"),
            email: BString::from("mingit@localhost"),
            timestamp: 0,
            tz: BString::from("+0000"),
        }
    }

    /// Parse from git format: `Name <email> timestamp tz`.
    pub fn parse(input: &BStr) -> Result<Self, ObjectError> {
        let input = input.as_bytes();

        let gt_pos = input
            .iter()
            .rposition(|&b| b == b'>')
            .ok_or_else(|| ObjectError::InvalidSignature("missing '>'".into()))?;
        let lt_pos = input[..gt_pos]
            .iter()
            .rposition(|&b| b == b'<')
            .ok_or_else(|| ObjectError::InvalidSignature("missing '<'".into()))?;

        let name = input[..lt_pos].trim();
        let email = &input[lt_pos + 1..gt_pos];

        let date = input[gt_pos + 1..].trim();
        let date = std::str::from_utf8(date)
            .map_err(|_| ObjectError::InvalidSignature("non-UTF-8 date".into()))?;
        let (secs, tz) = date
            .split_once(' ')
            .ok_or_else(|| ObjectError::InvalidSignature("missing timezone".into()))?;
        let timestamp: i64 = secs
            .parse()
            .map_err(|_| ObjectError::InvalidSignature(format!("invalid timestamp: {secs}")))?;

        Ok(Self {
            name: BString::from(name),
            email: BString::from(email),
            timestamp,
            tz: BString::from(tz),
        })
    }

    /// Serialize to git format.
    pub fn to_bytes(&self) -> BString {
        let mut out = BString::from(Vec::new());
        out.extend_from_slice(&self.name);
        out.extend_from_slice(b" <");
        out.extend_from_slice(&self.email);
        out.extend_from_slice(b"> ");
        out.extend_from_slice(format!("{} ", self.timestamp).as_bytes());
        out.extend_from_slice(&self.tz);
        out
    }
}
