use bstr::{BStr, BString, ByteSlice};
use mingit_hash::ObjectId;

use crate::ObjectError;

/// File mode for tree entries.
///
/// The closed set this implementation understands. Executable files are
/// recognized but checked out as regular files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileMode {
    /// Regular file (100644)
    Regular,
    /// Executable file (100755)
    Executable,
    /// Subdirectory (40000)
    Tree,
}

impl FileMode {
    /// Parse from octal ASCII bytes (e.g., `b"100644"`).
    pub fn from_bytes(s: &[u8]) -> Result<Self, ObjectError> {
        match s {
            b"100644" => Ok(Self::Regular),
            b"100755" => Ok(Self::Executable),
            b"40000" => Ok(Self::Tree),
            other => Err(ObjectError::InvalidFileMode(
                String::from_utf8_lossy(other).into(),
            )),
        }
    }

    /// Serialize to octal ASCII bytes (no leading zero for trees).
    pub fn as_bytes(&self) -> &'static [u8] {
        match self {
            Self::Regular => b"100644",
            Self::Executable => b"100755",
            Self::Tree => b"40000",
        }
    }

    /// Is this a tree (directory) entry?
    pub fn is_tree(&self) -> bool {
        matches!(self, Self::Tree)
    }

    /// Is this a blob (file) entry?
    pub fn is_blob(&self) -> bool {
        matches!(self, Self::Regular | Self::Executable)
    }
}

/// A single entry in a git tree object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeEntry {
    pub mode: FileMode,
    pub name: BString,
    pub oid: ObjectId,
}

/// A git tree object — a directory listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tree {
    pub entries: Vec<TreeEntry>,
}

impl Tree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse tree payload from binary format.
    ///
    /// Each entry is `"<mode> <name>\0<20-byte-oid>"`. Entry names must be
    /// non-empty, contain no `/` or NUL, and be unique within the tree.
    pub fn parse(payload: &[u8]) -> Result<Self, ObjectError> {
        let mut entries: Vec<TreeEntry> = Vec::new();
        let mut pos = 0;

        while pos < payload.len() {
            let space_pos = payload[pos..]
                .iter()
                .position(|&b| b == b' ')
                .ok_or_else(|| ObjectError::InvalidTreeEntry {
                    offset: pos,
                    reason: "missing space after mode".into(),
                })?
                + pos;

            let mode =
                FileMode::from_bytes(&payload[pos..space_pos]).map_err(|_| {
                    ObjectError::InvalidTreeEntry {
                        offset: pos,
                        reason: "invalid mode".into(),
                    }
                })?;

            let name_start = space_pos + 1;
            let null_pos = payload[name_start..]
                .iter()
                .position(|&b| b == 0)
                .ok_or_else(|| ObjectError::InvalidTreeEntry {
                    offset: name_start,
                    reason: "missing null after name".into(),
                })?
                + name_start;

            let name = &payload[name_start..null_pos];
            if name.is_empty() {
                return Err(ObjectError::InvalidTreeEntry {
                    offset: name_start,
                    reason: "empty entry name".into(),
                });
            }
            if name.contains(&b'/') {
                return Err(ObjectError::InvalidTreeEntry {
                    offset: name_start,
                    reason: "entry name contains '/'".into(),
                });
            }
            if entries.iter().any(|e| e.name.as_slice() == name) {
                return Err(ObjectError::InvalidTreeEntry {
                    offset: name_start,
                    reason: format!("duplicate entry name: {}", name.as_bstr()),
                });
            }

            let oid_start = null_pos + 1;
            if oid_start + 20 > payload.len() {
                return Err(ObjectError::InvalidTreeEntry {
                    offset: oid_start,
                    reason: "truncated OID".into(),
                });
            }
            let oid = ObjectId::from_bytes(&payload[oid_start..oid_start + 20])?;

            entries.push(TreeEntry {
                mode,
                name: BString::from(name),
                oid,
            });
            pos = oid_start + 20;
        }

        Ok(Self { entries })
    }

    /// Serialize tree payload to binary format.
    ///
    /// Entries are written sorted by name in byte-lexicographic order.
    pub fn serialize_payload(&self) -> Vec<u8> {
        let mut sorted: Vec<&TreeEntry> = self.entries.iter().collect();
        sorted.sort_by(|a, b| a.name.cmp(&b.name));

        let mut out = Vec::new();
        for entry in sorted {
            out.extend_from_slice(entry.mode.as_bytes());
            out.push(b' ');
            out.extend_from_slice(&entry.name);
            out.push(0);
            out.extend_from_slice(entry.oid.as_bytes());
        }
        out
    }

    /// Lookup an entry by name.
    pub fn find(&self, name: &BStr) -> Option<&TreeEntry> {
        self.entries.iter().find(|e| e.name.as_bstr() == name)
    }

    /// Iterate entries.
    pub fn iter(&self) -> impl Iterator<Item = &TreeEntry> {
        self.entries.iter()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the tree is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
