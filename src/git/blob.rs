use serde::Serialize;

use super::commit::CommitInfo;
use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BlobMetadata {
    pub path: String,
    pub byte_size: u64,
    pub permission_string: String,
    pub commit: CommitInfo,
}

/// Decoded text of one blob at one commit.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BlobContent {
    lines: Vec<String>,
}

impl BlobContent {
    /// Decode raw blob bytes. Content with a NUL byte in the first
    /// `sniff_len` bytes, or that is not UTF-8, is rejected.
    pub fn from_bytes(path: &str, bytes: &[u8], sniff_len: usize) -> Result<Self> {
        if is_binary(bytes, sniff_len) {
            return Err(Error::unsupported(path, "binary content"));
        }

        let text = std::str::from_utf8(bytes).map_err(|e| {
            Error::unsupported(path, format!("not valid UTF-8 (byte {})", e.valid_up_to()))
        })?;

        Ok(Self::from_text(text))
    }

    pub fn from_text(text: &str) -> Self {
        Self {
            lines: text.lines().map(str::to_string).collect(),
        }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// 1-based line lookup.
    pub fn line(&self, index: usize) -> Option<&str> {
        index
            .checked_sub(1)
            .and_then(|i| self.lines.get(i))
            .map(String::as_str)
    }
}

pub fn is_binary(bytes: &[u8], sniff_len: usize) -> bool {
    bytes.iter().take(sniff_len).any(|&b| b == 0)
}

/// Render a git file mode the way `ls -l` style web viewers do.
pub fn permission_string(filemode: i32) -> String {
    match filemode {
        0o100644 => "-rw-r--r--",
        0o100755 => "-rwxr-xr-x",
        0o100664 => "-rw-rw-r--",
        0o120000 => "lrwxrwxrwx",
        0o160000 => "m---------",
        0o040000 => "d---------",
        _ => "----------",
    }
    .to_string()
}
