#![cfg_attr(not(feature = "std"), no_std)]

#[macro_use]
extern crate ark_std;

mod error;
mod scalar;
pub mod sequence;
pub mod text;
pub mod triangular_matrix;

pub use error::AlgebraError;
pub use scalar::Scalar;
pub use sequence::Sequence;
pub use text::ReadElements;
pub use triangular_matrix::TriangularMatrix;

/// Largest number of elements a [`Sequence`] may hold.
pub const MAX_SEQUENCE_LEN: usize = 100_000_000;

/// Exclusive upper bound on the order of a [`TriangularMatrix`].
pub const MAX_MATRIX_ORDER: usize = 10_000;
