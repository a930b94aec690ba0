//! Parsed source files.

use serde::{Deserialize, Serialize};

/// A source file as delivered by the parser: a name plus raw contents.
///
/// The contents are opaque payload here. They are kept byte-for-byte so
/// that exported file trees reproduce the input exactly, whatever its
/// encoding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceFile {
    /// File name relative to the program's directory (e.g. `main.cml`)
    pub name: String,
    /// Raw file contents
    pub contents: Vec<u8>,
}

impl SourceFile {
    /// Create a new source file.
    pub fn new(name: impl Into<String>, contents: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            contents: contents.into(),
        }
    }

    /// The contents as text, with invalid UTF-8 replaced.
    pub fn contents_lossy(&self) -> String {
        String::from_utf8_lossy(&self.contents).into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_file() {
        let file = SourceFile::new("main.cml", "config region\n");
        assert_eq!(file.name, "main.cml");
        assert_eq!(file.contents_lossy(), "config region\n");
    }
}
