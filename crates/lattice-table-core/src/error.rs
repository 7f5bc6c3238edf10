//! Error types for Lattice Table.
//!
//! Almost everything these errors describe is a programming error on the
//! caller's side. The list manager treats them as fatal: it logs the error
//! and panics at the offending call, so the model and the widget never get
//! out of step. They are still ordinary values so that validation can happen
//! before any state is touched, and so that tests can assert on them.

/// Result type alias for Lattice Table operations.
pub type Result<T> = std::result::Result<T, TableError>;

/// A multi-index splice whose precondition does not hold.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SpliceError {
    /// The number of positions differs from the number of elements.
    #[error("{positions} positions given for {elements} elements")]
    CountMismatch { positions: usize, elements: usize },

    /// A position lies beyond the end of the sequence.
    #[error("position {position} is out of bounds for a sequence of length {len}")]
    OutOfBounds { position: usize, len: usize },
}

/// The main error type for Lattice Table operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TableError {
    /// A splice precondition failed.
    #[error("invalid splice: {0}")]
    Splice(#[from] SpliceError),

    /// The section item is not part of the manager's sections.
    #[error("section item is not contained in the manager's sections")]
    SectionNotFound,

    /// A row item is not part of the section it was said to belong to.
    #[error("row item is not contained in section {section}")]
    RowNotFound { section: usize },

    /// A section index lies beyond the current section count.
    #[error("section index {index} is out of bounds for {len} sections")]
    SectionIndexOutOfBounds { index: usize, len: usize },

    /// A mutation was issued while another mutation's update batch was open.
    #[error("an update batch is already open; list mutations cannot nest")]
    NestedBatch,

    /// A row item declared an empty reuse identifier.
    #[error("row item declares an empty reuse identifier")]
    EmptyReuseIdentifier,

    /// The host widget cannot prefetch rows.
    #[error("the host list widget does not support prefetching")]
    PrefetchingUnsupported,
}

impl TableError {
    /// Returns `true` for errors raised by splice validation.
    pub fn is_splice(&self) -> bool {
        matches!(self, Self::Splice(_))
    }
}
