use std::fs;
use std::path::Path;

use crate::error::LoadError;

/// The loaded program: raw bytes, immutable once created.
///
/// Bytes outside the eight opcodes stay in place so instruction indices in
/// error messages line up with offsets in the source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Program {
    bytes: Vec<u8>,
}

impl Program {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self { bytes: bytes.into() }
    }

    /// Read the whole file at `path`. No encoding is assumed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        fs::read(path)
            .map(Self::new)
            .map_err(|source| LoadError { path: path.to_path_buf(), source })
    }

    /// Byte at `index`. Callers bounds-check against [`Program::len`] first.
    pub fn at(&self, index: usize) -> u8 {
        self.bytes[index]
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl From<&str> for Program {
    fn from(code: &str) -> Self {
        Self::new(code.as_bytes())
    }
}
