use thiserror::Error;

#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum AlgebraError {
    /// Requested sequence length is not in `1..=MAX_SEQUENCE_LEN`.
    #[error("Invalid sequence length: {0}")]
    InvalidLength(isize),
    #[error("Invalid start index: {0}")]
    InvalidStartIndex(isize),
    /// Requested matrix order is not in `0..MAX_MATRIX_ORDER`.
    #[error("Invalid matrix order: {0}")]
    InvalidOrder(isize),
    /// Row `row` of an adopted sequence of sequences does not have the triangular shape.
    #[error("Row {row} does not fit an upper-triangular shape")]
    NotTriangular { row: usize },
    #[error("Index {index} out of range {start}..{end}")]
    IndexOutOfRange {
        index: isize,
        start: usize,
        end: usize,
    },
    /// Fail due to operations on structures of unexpected differing lengths.
    #[error("Unexpected different lengths: {0} and {1}")]
    DifferentLengths(usize, usize),
    #[error("Missing element at position {0}")]
    MissingElement(usize),
    #[error("Cannot parse element at position {0}")]
    InvalidElement(usize),
}
