use crate::{AlgebraError, Scalar, MAX_SEQUENCE_LEN};
use ark_serialize::{
    CanonicalDeserialize, CanonicalSerialize, Compress, SerializationError, Valid, Validate,
};
use ark_std::{
    io::{Read, Write},
    ops::{Add, Index, IndexMut, Mul, MulAssign, Sub},
    rand::Rng,
    slice,
    vec::*,
    UniformRand, Zero,
};
use delegate::delegate;
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Resizable one-dimensional container whose valid indices are
/// `start_index..start_index + len`.
///
/// A sequence is never empty and never longer than [`MAX_SEQUENCE_LEN`].
#[derive(Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawSequence<R>")]
pub struct Sequence<R> {
    start_index: usize,
    vals: Vec<R>,
}

/// Unvalidated wire form of a [`Sequence`].
#[derive(Deserialize)]
struct RawSequence<R> {
    start_index: isize,
    vals: Vec<R>,
}

impl<R> TryFrom<RawSequence<R>> for Sequence<R> {
    type Error = AlgebraError;

    fn try_from(raw: RawSequence<R>) -> Result<Self, Self::Error> {
        Self::from_vec(raw.vals, raw.start_index)
    }
}

fn check_len(len: isize) -> Result<usize, AlgebraError> {
    usize::try_from(len)
        .ok()
        .filter(|len| (1..=MAX_SEQUENCE_LEN).contains(len))
        .ok_or(AlgebraError::InvalidLength(len))
}

fn check_start_index(start_index: isize) -> Result<usize, AlgebraError> {
    usize::try_from(start_index).map_err(|_| AlgebraError::InvalidStartIndex(start_index))
}

#[allow(clippy::len_without_is_empty)]
impl<R> Sequence<R> {
    /// Adopts `vals` as the content of a sequence starting at `start_index`.
    pub fn from_vec(vals: Vec<R>, start_index: isize) -> Result<Self, AlgebraError> {
        check_len(vals.len() as isize)?;
        let start_index = check_start_index(start_index)?;
        Ok(Self { start_index, vals })
    }

    delegate! {
        to self.vals {
            /// Number of stored elements.
            pub fn len(&self) -> usize;
            pub fn as_slice(&self) -> &[R];
            pub fn iter(&self) -> slice::Iter<'_, R>;
            pub fn iter_mut(&mut self) -> slice::IterMut<'_, R>;
        }
    }

    pub fn start_index(&self) -> usize {
        self.start_index
    }

    /// One past the largest valid index.
    pub fn end_index(&self) -> usize {
        self.start_index + self.vals.len()
    }

    pub fn into_vec(self) -> Vec<R> {
        self.vals
    }

    /// Translates an external index into a buffer position.
    fn offset(&self, pos: isize) -> Result<usize, AlgebraError> {
        pos.checked_sub(self.start_index as isize)
            .and_then(|i| usize::try_from(i).ok())
            .filter(|i| *i < self.vals.len())
            .ok_or(AlgebraError::IndexOutOfRange {
                index: pos,
                start: self.start_index,
                end: self.end_index(),
            })
    }

    pub fn get(&self, pos: isize) -> Result<&R, AlgebraError> {
        let i = self.offset(pos)?;
        Ok(&self.vals[i])
    }

    pub fn get_mut(&mut self, pos: isize) -> Result<&mut R, AlgebraError> {
        let i = self.offset(pos)?;
        Ok(&mut self.vals[i])
    }

    pub fn set(&mut self, pos: isize, val: R) -> Result<(), AlgebraError> {
        *self.get_mut(pos)? = val;
        Ok(())
    }
}

impl<R: Clone + Zero> Sequence<R> {
    /// Sequence of `len` zeroes whose first index is `start_index`.
    pub fn zero(len: isize, start_index: isize) -> Result<Self, AlgebraError> {
        let len = check_len(len)?;
        let start_index = check_start_index(start_index)?;
        Ok(Self {
            start_index,
            vals: vec![R::zero(); len],
        })
    }

    pub fn new(len: isize) -> Result<Self, AlgebraError> {
        Self::zero(len, 0)
    }
}

impl<R: UniformRand> Sequence<R> {
    pub fn rand<RND: Rng>(
        rng: &mut RND,
        len: isize,
        start_index: isize,
    ) -> Result<Self, AlgebraError> {
        let len = check_len(len)?;
        let start_index = check_start_index(start_index)?;
        let vals = (0..len).map(|_| R::rand(rng)).collect::<Vec<R>>();
        Ok(Self { start_index, vals })
    }
}

impl<R: Clone> Clone for Sequence<R> {
    fn clone(&self) -> Self {
        Self {
            start_index: self.start_index,
            vals: self.vals.clone(),
        }
    }

    /// Assignment: the buffer is only reallocated when the lengths differ.
    fn clone_from(&mut self, source: &Self) {
        if self.vals.len() != source.vals.len() {
            log::debug!(
                "resizing sequence from {} to {} elements",
                self.vals.len(),
                source.vals.len()
            );
        }
        self.vals.clone_from(&source.vals);
        self.start_index = source.start_index;
    }
}

impl<R> IntoIterator for Sequence<R> {
    type Item = R;
    type IntoIter = ark_std::vec::IntoIter<R>;

    fn into_iter(self) -> Self::IntoIter {
        self.vals.into_iter()
    }
}

impl<'a, R> IntoIterator for &'a Sequence<R> {
    type Item = &'a R;
    type IntoIter = slice::Iter<'a, R>;

    fn into_iter(self) -> Self::IntoIter {
        self.vals.iter()
    }
}

impl<'a, R> IntoIterator for &'a mut Sequence<R> {
    type Item = &'a mut R;
    type IntoIter = slice::IterMut<'a, R>;

    fn into_iter(self) -> Self::IntoIter {
        self.vals.iter_mut()
    }
}

impl<R> Index<isize> for Sequence<R> {
    type Output = R;

    fn index(&self, pos: isize) -> &R {
        self.get(pos).unwrap()
    }
}

impl<R> IndexMut<isize> for Sequence<R> {
    fn index_mut(&mut self, pos: isize) -> &mut R {
        self.get_mut(pos).unwrap()
    }
}

impl<R: Scalar> Sequence<R> {
    pub fn add_scalar(&self, val: &R) -> Self {
        let mut res = self.clone();
        cfg_iter_mut!(res.vals).for_each(|r| *r += val);
        res
    }

    pub fn sub_scalar(&self, val: &R) -> Self {
        let mut res = self.clone();
        cfg_iter_mut!(res.vals).for_each(|r| *r -= val);
        res
    }

    pub fn mul_scalar(&self, val: &R) -> Self {
        let mut res = self.clone();
        res *= val;
        res
    }

    /// Element-wise sum, keeping the start index of `self`.
    pub fn checked_add(&self, other: &Self) -> Option<Self> {
        if self.len() != other.len() {
            return None;
        }

        let mut res = self.clone();
        cfg_iter_mut!(res.vals)
            .zip(cfg_iter!(other.vals))
            .for_each(|(r, o)| *r += o);
        Some(res)
    }

    pub fn try_add(&self, other: &Self) -> Result<Self, AlgebraError> {
        self.checked_add(other)
            .ok_or(AlgebraError::DifferentLengths(self.len(), other.len()))
    }

    /// Element-wise difference, keeping the start index of `self`.
    pub fn checked_sub(&self, other: &Self) -> Option<Self> {
        if self.len() != other.len() {
            return None;
        }

        let mut res = self.clone();
        cfg_iter_mut!(res.vals)
            .zip(cfg_iter!(other.vals))
            .for_each(|(r, o)| *r -= o);
        Some(res)
    }

    pub fn try_sub(&self, other: &Self) -> Result<Self, AlgebraError> {
        self.checked_sub(other)
            .ok_or(AlgebraError::DifferentLengths(self.len(), other.len()))
    }

    /// Returns `sum([a_i * b_i])`.
    pub fn checked_dot(&self, other: &Self) -> Option<R> {
        if self.len() != other.len() {
            return None;
        }

        let mut sum = R::zero();
        for (a, b) in self.vals.iter().zip(other.vals.iter()) {
            sum += &(a.clone() * b.clone());
        }
        Some(sum)
    }

    pub fn try_dot(&self, other: &Self) -> Result<R, AlgebraError> {
        self.checked_dot(other)
            .ok_or(AlgebraError::DifferentLengths(self.len(), other.len()))
    }
}

impl<R: Scalar> Add<&Sequence<R>> for &Sequence<R> {
    type Output = Sequence<R>;

    fn add(self, rhs: &Sequence<R>) -> Sequence<R> {
        self.try_add(rhs).unwrap()
    }
}

impl<R: Scalar> Sub<&Sequence<R>> for &Sequence<R> {
    type Output = Sequence<R>;

    fn sub(self, rhs: &Sequence<R>) -> Sequence<R> {
        self.try_sub(rhs).unwrap()
    }
}

/// Dot product.
impl<R: Scalar> Mul<&Sequence<R>> for &Sequence<R> {
    type Output = R;

    fn mul(self, rhs: &Sequence<R>) -> R {
        self.try_dot(rhs).unwrap()
    }
}

impl<R: Scalar> MulAssign<&R> for Sequence<R> {
    fn mul_assign(&mut self, r: &R) {
        cfg_iter_mut!(self.vals).for_each(|r_s| *r_s *= r)
    }
}

impl<R: CanonicalSerialize> CanonicalSerialize for Sequence<R> {
    fn serialize_with_mode<W: Write>(
        &self,
        mut writer: W,
        compress: Compress,
    ) -> Result<(), SerializationError> {
        let start_index = self.start_index as u64;
        start_index.serialize_with_mode(&mut writer, compress)?;
        self.vals.serialize_with_mode(&mut writer, compress)?;
        Ok(())
    }

    fn serialized_size(&self, compress: Compress) -> usize {
        8 + self.vals.serialized_size(compress)
    }
}

impl<R: CanonicalDeserialize> Valid for Sequence<R> {
    fn check(&self) -> Result<(), SerializationError> {
        Vec::<R>::check(&self.vals)
    }
}

impl<R: CanonicalDeserialize> CanonicalDeserialize for Sequence<R> {
    fn deserialize_with_mode<Re: Read>(
        mut reader: Re,
        compress: Compress,
        validate: Validate,
    ) -> Result<Self, SerializationError> {
        let start_index = u64::deserialize_with_mode(&mut reader, compress, validate)?;
        let vals = Vec::<R>::deserialize_with_mode(&mut reader, compress, validate)?;
        let start_index =
            isize::try_from(start_index).map_err(|_| SerializationError::InvalidData)?;
        Self::from_vec(vals, start_index).map_err(|_| SerializationError::InvalidData)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ark_std::test_rng;

    fn sample_sequence() -> Sequence<i32> {
        Sequence::from_vec((0..10).collect(), 0).unwrap()
    }

    #[test]
    fn test_create_with_positive_length() {
        let s = Sequence::<i32>::zero(5, 3).unwrap();
        assert_eq!(s.len(), 5);
        assert_eq!(s.start_index(), 3);
        assert_eq!(s.end_index(), 8);
        assert!(s.iter().all(|v| *v == 0));
    }

    #[test]
    fn test_create_invalid() {
        assert_eq!(Sequence::<i32>::new(0), Err(AlgebraError::InvalidLength(0)));
        assert_eq!(
            Sequence::<i32>::new(-5),
            Err(AlgebraError::InvalidLength(-5))
        );
        let too_long = MAX_SEQUENCE_LEN as isize + 1;
        assert_eq!(
            Sequence::<i32>::new(too_long),
            Err(AlgebraError::InvalidLength(too_long))
        );
        assert_eq!(
            Sequence::<i32>::zero(5, -2),
            Err(AlgebraError::InvalidStartIndex(-2))
        );
        assert!(Sequence::<i32>::from_vec(vec![], 0).is_err());
    }

    #[test]
    fn test_set_and_get_with_offset() {
        let mut s = Sequence::<i32>::zero(4, 2).unwrap();
        for pos in 2..6 {
            s.set(pos, pos as i32 * 10).unwrap();
        }
        for pos in 2..6 {
            assert_eq!(*s.get(pos).unwrap(), pos as i32 * 10);
        }
        s[3] = 7;
        assert_eq!(s[3], 7);

        for pos in [-1, 0, 1, 6, isize::MIN, isize::MAX] {
            assert_eq!(
                s.get(pos),
                Err(AlgebraError::IndexOutOfRange {
                    index: pos,
                    start: 2,
                    end: 6
                })
            );
        }
        assert!(s.set(6, 1).is_err());
        assert_eq!(s.as_slice(), &[20, 7, 40, 50]);
    }

    #[test]
    #[should_panic]
    fn test_index_negative() {
        let s = Sequence::<i32>::new(10).unwrap();
        let _v = s[-1];
    }

    #[test]
    #[should_panic]
    fn test_index_too_large() {
        let mut s = Sequence::<i32>::new(10).unwrap();
        s[10] = 1;
    }

    #[test]
    fn test_copy_is_independent() {
        let mut a = sample_sequence();
        let mut b = a.clone();
        assert_eq!(a, b);
        assert_ne!(a.as_slice().as_ptr(), b.as_slice().as_ptr());

        a[0] = 100;
        assert_eq!(b[0], 0);
        b[1] = 200;
        assert_eq!(a[1], 1);
    }

    #[test]
    #[allow(clippy::redundant_locals)]
    fn test_assign_to_itself() {
        let a = sample_sequence();
        let expected = a.clone();
        let a = a;
        assert_eq!(a, expected);
    }

    #[test]
    fn test_assign_adopts_shape() {
        let a = Sequence::from_vec(vec![1, 2, 3, 4, 5], 4).unwrap();

        let mut same_len = Sequence::<i32>::new(5).unwrap();
        same_len.clone_from(&a);
        assert_eq!(same_len, a);

        let mut longer = Sequence::<i32>::new(10).unwrap();
        longer.clone_from(&a);
        assert_eq!(longer.len(), 5);
        assert_eq!(longer.start_index(), 4);
        assert_eq!(longer, a);
    }

    #[test]
    fn test_equality() {
        let a = sample_sequence();
        assert_eq!(a, a);

        let shifted = Sequence::from_vec((0..10).collect(), 1).unwrap();
        assert_ne!(a, shifted);

        // Same prefix, different length
        let mut longer = Sequence::<i32>::new(12).unwrap();
        for i in 0..10 {
            longer[i] = i as i32;
        }
        assert_ne!(a, longer);

        let mut changed = a.clone();
        changed[9] = -1;
        assert_ne!(a, changed);
    }

    #[test]
    fn test_scalar_ops() {
        let a = Sequence::from_vec(vec![1, 2, 3], 2).unwrap();

        assert_eq!(a.add_scalar(&5).as_slice(), &[6, 7, 8]);
        assert_eq!(a.sub_scalar(&1).as_slice(), &[0, 1, 2]);
        let scaled = a.mul_scalar(&3);
        assert_eq!(scaled.as_slice(), &[3, 6, 9]);
        assert_eq!(scaled.start_index(), 2);
        assert_eq!(a.as_slice(), &[1, 2, 3]);

        let mut b = a.clone();
        b *= &-1;
        assert_eq!(b.as_slice(), &[-1, -2, -3]);
    }

    #[test]
    fn test_add_sub() {
        let a = Sequence::from_vec(vec![1, 2, 3], 1).unwrap();
        let b = Sequence::from_vec(vec![10, 20, 30], 0).unwrap();

        let sum = &a + &b;
        assert_eq!(sum.as_slice(), &[11, 22, 33]);
        assert_eq!(sum.start_index(), 1);
        assert_eq!((&b - &a).as_slice(), &[9, 18, 27]);

        let c = Sequence::<i32>::new(4).unwrap();
        assert_eq!(a.checked_add(&c), None);
        assert_eq!(a.try_sub(&c), Err(AlgebraError::DifferentLengths(3, 4)));
    }

    #[test]
    #[should_panic]
    fn test_add_operator_different_lengths() {
        let a = Sequence::<i32>::new(10).unwrap();
        let b = Sequence::<i32>::new(12).unwrap();
        let _ = &a + &b;
    }

    #[test]
    fn test_add_elementwise_random() {
        let rng = &mut test_rng();
        let a = Sequence::<f64>::rand(rng, 32, 5).unwrap();
        let b = Sequence::<f64>::rand(rng, 32, 0).unwrap();

        let sum = a.try_add(&b).unwrap();
        let diff = a.try_sub(&b).unwrap();
        for (i, pos) in (5..37).enumerate() {
            assert_eq!(sum[pos], a[pos] + b[i as isize]);
            assert_eq!(diff[pos], a[pos] - b[i as isize]);
        }
    }

    #[test]
    fn test_dot() {
        let a = Sequence::from_vec(vec![1, 2, 3, 4], 0).unwrap();
        let b = Sequence::<i32>::new(4).unwrap().add_scalar(&6);
        assert_eq!(&a * &b, 60);
        assert_eq!(a.try_dot(&a), Ok(30));

        let c = Sequence::<i32>::new(12).unwrap();
        assert_eq!(a.checked_dot(&c), None);
        assert!(matches!(
            a.try_dot(&c),
            Err(AlgebraError::DifferentLengths(4, 12))
        ));
    }

    #[test]
    fn test_into_iter() {
        let mut a = Sequence::from_vec(vec![1, 2, 3], 7).unwrap();
        for v in &mut a {
            *v *= 2;
        }
        assert_eq!((&a).into_iter().sum::<i32>(), 12);
        assert_eq!(a.into_iter().collect::<Vec<_>>(), vec![2, 4, 6]);

        let b = Sequence::<f64>::zero(3, 1).unwrap().add_scalar(&0.5);
        let mut total = 0.0;
        for v in &b {
            total += *v;
        }
        assert_eq!(total, 1.5);
        assert_eq!(b.into_iter().count(), 3);
    }

    #[test]
    fn test_canonical_serialization() {
        let a = Sequence::from_vec(vec![3u64, 1, 4, 1, 5], 2).unwrap();
        let mut bytes = Vec::new();
        a.serialize_compressed(&mut bytes).unwrap();
        assert_eq!(bytes.len(), a.compressed_size());
        assert_eq!(
            Sequence::<u64>::deserialize_compressed(&bytes[..]).unwrap(),
            a
        );

        let mut empty = Vec::new();
        0u64.serialize_compressed(&mut empty).unwrap();
        Vec::<u64>::new().serialize_compressed(&mut empty).unwrap();
        assert!(matches!(
            Sequence::<u64>::deserialize_compressed(&empty[..]),
            Err(SerializationError::InvalidData)
        ));
    }

    #[test]
    fn test_serde() {
        let a = Sequence::from_vec(vec![1, 2, 3], 4).unwrap();
        let json = serde_json::to_string(&a).unwrap();
        assert_eq!(json, r#"{"start_index":4,"vals":[1,2,3]}"#);
        assert_eq!(serde_json::from_str::<Sequence<i32>>(&json).unwrap(), a);

        assert!(serde_json::from_str::<Sequence<i32>>(r#"{"start_index":0,"vals":[]}"#).is_err());
        assert!(serde_json::from_str::<Sequence<i32>>(r#"{"start_index":-1,"vals":[1]}"#).is_err());
    }
}
