//! Options for controlled reading into a `Document`.

/// Read behavior options for [`crate::decode_with_options`] and
/// [`crate::read_with_options`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ReadOptions {
    /// Reject documents that have validation findings.
    pub strict: bool,
}

impl ReadOptions {
    /// Creates default (lenient) read options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enables/disables strict mode.
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }
}
