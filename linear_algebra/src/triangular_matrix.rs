use crate::{AlgebraError, Scalar, Sequence, MAX_MATRIX_ORDER};
use ark_serialize::{
    CanonicalDeserialize, CanonicalSerialize, Compress, SerializationError, Valid, Validate,
};
use ark_std::{
    io::{Read, Write},
    ops::{Add, Index, IndexMut, Sub},
    rand::Rng,
    slice,
    vec::*,
    UniformRand, Zero,
};
use delegate::delegate;
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use serde::{Deserialize, Serialize, Serializer};

/// Square matrix storing only the entries on and above the diagonal.
///
/// Row `i` is a [`Sequence`] of length `order - i` starting at index `i`, so
/// entries are addressed by absolute column number and the lower triangle is
/// not addressable at all.
#[derive(Debug, Eq, PartialEq, Deserialize)]
#[serde(try_from = "Vec<Sequence<R>>")]
pub struct TriangularMatrix<R> {
    rows: Vec<Sequence<R>>,
}

fn check_order(order: isize) -> Result<usize, AlgebraError> {
    usize::try_from(order)
        .ok()
        .filter(|order| *order < MAX_MATRIX_ORDER)
        .ok_or(AlgebraError::InvalidOrder(order))
}

impl<R> TriangularMatrix<R> {
    delegate! {
        to self.rows {
            pub fn iter(&self) -> slice::Iter<'_, Sequence<R>>;
        }
    }

    /// Number of rows, equal to the number of columns.
    pub fn order(&self) -> usize {
        self.rows.len()
    }

    pub fn into_rows(self) -> Vec<Sequence<R>> {
        self.rows
    }

    fn row_offset(&self, i: isize) -> Result<usize, AlgebraError> {
        usize::try_from(i)
            .ok()
            .filter(|i| *i < self.rows.len())
            .ok_or(AlgebraError::IndexOutOfRange {
                index: i,
                start: 0,
                end: self.rows.len(),
            })
    }

    pub fn row(&self, i: isize) -> Result<&Sequence<R>, AlgebraError> {
        let i = self.row_offset(i)?;
        Ok(&self.rows[i])
    }

    /// Entry at row `i`, column `j`; only `i <= j < order` is addressable.
    pub fn get(&self, i: isize, j: isize) -> Result<&R, AlgebraError> {
        self.row(i)?.get(j)
    }

    pub fn get_mut(&mut self, i: isize, j: isize) -> Result<&mut R, AlgebraError> {
        let i = self.row_offset(i)?;
        self.rows[i].get_mut(j)
    }

    pub fn set(&mut self, i: isize, j: isize, val: R) -> Result<(), AlgebraError> {
        *self.get_mut(i, j)? = val;
        Ok(())
    }
}

impl<R: Clone + Zero> TriangularMatrix<R> {
    pub fn zero(order: isize) -> Result<Self, AlgebraError> {
        let order = check_order(order)?;
        let rows = (0..order)
            .map(|i| Sequence::zero((order - i) as isize, i as isize))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { rows })
    }

    pub fn new(order: isize) -> Result<Self, AlgebraError> {
        Self::zero(order)
    }
}

impl<R: UniformRand> TriangularMatrix<R> {
    pub fn rand<RND: Rng>(rng: &mut RND, order: isize) -> Result<Self, AlgebraError> {
        let order = check_order(order)?;
        let rows = (0..order)
            .map(|i| Sequence::rand(rng, (order - i) as isize, i as isize))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { rows })
    }
}

/// Adopts `rows` after checking the order bound and that row `i` has length
/// `order - i` and start index `i`.
impl<R> TryFrom<Vec<Sequence<R>>> for TriangularMatrix<R> {
    type Error = AlgebraError;

    fn try_from(rows: Vec<Sequence<R>>) -> Result<Self, Self::Error> {
        let order = rows.len();
        if order >= MAX_MATRIX_ORDER {
            return Err(AlgebraError::InvalidOrder(order as isize));
        }

        let malformed = rows
            .iter()
            .enumerate()
            .find(|(i, row)| row.start_index() != *i || row.len() != order - i);
        if let Some((row, _)) = malformed {
            log::warn!("rejecting row {row} of a {order}-row sequence: not upper-triangular");
            return Err(AlgebraError::NotTriangular { row });
        }

        Ok(Self { rows })
    }
}

impl<R> TryFrom<Sequence<Sequence<R>>> for TriangularMatrix<R> {
    type Error = AlgebraError;

    fn try_from(seq: Sequence<Sequence<R>>) -> Result<Self, Self::Error> {
        if seq.start_index() != 0 {
            return Err(AlgebraError::InvalidStartIndex(seq.start_index() as isize));
        }
        Self::try_from(seq.into_vec())
    }
}

impl<R: Clone> Clone for TriangularMatrix<R> {
    fn clone(&self) -> Self {
        Self {
            rows: self.rows.clone(),
        }
    }

    /// Reuses the rows of `self` where the shapes line up.
    fn clone_from(&mut self, source: &Self) {
        self.rows.clone_from(&source.rows);
    }
}

impl<R> Index<isize> for TriangularMatrix<R> {
    type Output = Sequence<R>;

    fn index(&self, i: isize) -> &Sequence<R> {
        self.row(i).unwrap()
    }
}

impl<R> Index<(isize, isize)> for TriangularMatrix<R> {
    type Output = R;

    fn index(&self, (i, j): (isize, isize)) -> &R {
        self.get(i, j).unwrap()
    }
}

impl<R> IndexMut<(isize, isize)> for TriangularMatrix<R> {
    fn index_mut(&mut self, (i, j): (isize, isize)) -> &mut R {
        self.get_mut(i, j).unwrap()
    }
}

impl<R: Scalar> TriangularMatrix<R> {
    pub fn checked_add(&self, other: &Self) -> Option<Self> {
        if self.order() != other.order() {
            return None;
        }

        let rows = cfg_iter!(self.rows)
            .zip(cfg_iter!(other.rows))
            .map(|(a, b)| a.checked_add(b))
            .collect::<Option<Vec<_>>>()?;
        Some(Self { rows })
    }

    pub fn try_add(&self, other: &Self) -> Result<Self, AlgebraError> {
        self.checked_add(other)
            .ok_or(AlgebraError::DifferentLengths(self.order(), other.order()))
    }

    pub fn checked_sub(&self, other: &Self) -> Option<Self> {
        if self.order() != other.order() {
            return None;
        }

        let rows = cfg_iter!(self.rows)
            .zip(cfg_iter!(other.rows))
            .map(|(a, b)| a.checked_sub(b))
            .collect::<Option<Vec<_>>>()?;
        Some(Self { rows })
    }

    pub fn try_sub(&self, other: &Self) -> Result<Self, AlgebraError> {
        self.checked_sub(other)
            .ok_or(AlgebraError::DifferentLengths(self.order(), other.order()))
    }
}

impl<R: Scalar> Add<&TriangularMatrix<R>> for &TriangularMatrix<R> {
    type Output = TriangularMatrix<R>;

    fn add(self, rhs: &TriangularMatrix<R>) -> TriangularMatrix<R> {
        self.try_add(rhs).unwrap()
    }
}

impl<R: Scalar> Sub<&TriangularMatrix<R>> for &TriangularMatrix<R> {
    type Output = TriangularMatrix<R>;

    fn sub(self, rhs: &TriangularMatrix<R>) -> TriangularMatrix<R> {
        self.try_sub(rhs).unwrap()
    }
}

impl<R: Serialize> Serialize for TriangularMatrix<R> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.rows.serialize(serializer)
    }
}

impl<R: CanonicalSerialize> CanonicalSerialize for TriangularMatrix<R> {
    fn serialize_with_mode<W: Write>(
        &self,
        mut writer: W,
        compress: Compress,
    ) -> Result<(), SerializationError> {
        self.rows.serialize_with_mode(&mut writer, compress)?;
        Ok(())
    }

    fn serialized_size(&self, compress: Compress) -> usize {
        self.rows.serialized_size(compress)
    }
}

impl<R: CanonicalDeserialize> Valid for TriangularMatrix<R> {
    fn check(&self) -> Result<(), SerializationError> {
        Vec::<Sequence<R>>::check(&self.rows)
    }
}

impl<R: CanonicalDeserialize> CanonicalDeserialize for TriangularMatrix<R> {
    fn deserialize_with_mode<Re: Read>(
        mut reader: Re,
        compress: Compress,
        validate: Validate,
    ) -> Result<Self, SerializationError> {
        let rows = Vec::<Sequence<R>>::deserialize_with_mode(&mut reader, compress, validate)?;
        Self::try_from(rows).map_err(|_| SerializationError::InvalidData)
    }
}
