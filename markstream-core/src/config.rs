//! Tokenizer configuration.

/// Options fixed for the lifetime of a [`Tokenizer`](crate::Tokenizer).
///
/// Whether end of input is an error is chosen per extraction call, not here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TokenizerConfig {
    /// Collapse CR, LF, CRLF, LFCR, NEL, VT, FF, LS and PS into `'\n'`.
    pub normalize_line_endings: bool,
    /// Initial capacity of the entry buffer, in bytes.
    pub entry_capacity: usize,
}

impl TokenizerConfig {
    pub fn new() -> Self {
        Self {
            normalize_line_endings: true,
            entry_capacity: 64,
        }
    }

    pub fn with_normalize_line_endings(mut self, normalize: bool) -> Self {
        self.normalize_line_endings = normalize;
        self
    }

    pub fn with_entry_capacity(mut self, capacity: usize) -> Self {
        self.entry_capacity = capacity;
        self
    }
}

impl Default for TokenizerConfig {
    fn default() -> Self {
        Self::new()
    }
}
