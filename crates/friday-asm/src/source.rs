//! Source files taking part in one assembly run.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    /// Path as given on the command line; also the diagnostic file name.
    pub path: String,
    pub text: String,
}

impl SourceFile {
    pub fn new(path: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            text: text.into(),
        }
    }

    /// Decode the raw contents of `path`.
    pub fn from_bytes(path: impl Into<String>, bytes: Vec<u8>) -> Result<Self, EncodingError> {
        let path = path.into();
        match String::from_utf8(bytes) {
            Ok(text) => Ok(Self::new(path, text)),
            Err(err) => {
                let bytes = err.as_bytes();
                let offset = err.utf8_error().valid_up_to();
                let line = 1 + bytes[..offset].iter().filter(|&&b| b == b'\n').count();
                Err(EncodingError { path, line, offset })
            }
        }
    }
}

/// A source file whose bytes are not UTF-8.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("source is not valid UTF-8: bad byte at offset {offset}")]
pub struct EncodingError {
    pub path: String,
    /// 1-based line holding the first bad byte.
    pub line: usize,
    pub offset: usize,
}

/// Files in assembly order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceMap {
    files: Vec<SourceFile>,
}

impl SourceMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, file: SourceFile) -> &SourceFile {
        self.files.push(file);
        &self.files[self.files.len() - 1]
    }

    pub fn get(&self, path: &str) -> Option<&SourceFile> {
        self.files.iter().find(|f| f.path == path)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SourceFile> {
        self.files.iter()
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}
