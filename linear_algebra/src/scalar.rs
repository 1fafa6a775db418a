use ark_std::{
    fmt::Debug,
    ops::{Add, AddAssign, Mul, MulAssign, Sub, SubAssign},
    Zero,
};

/// Element types the containers can do arithmetic on.
pub trait Scalar:
    Clone
    + Debug
    + PartialEq
    + Zero
    + Send
    + Sync
    + Add<Self, Output = Self>
    + Sub<Self, Output = Self>
    + Mul<Self, Output = Self>
    + for<'a> AddAssign<&'a Self>
    + for<'a> SubAssign<&'a Self>
    + for<'a> MulAssign<&'a Self>
{
}

impl<T> Scalar for T where
    T: Clone
        + Debug
        + PartialEq
        + Zero
        + Send
        + Sync
        + Add<T, Output = T>
        + Sub<T, Output = T>
        + Mul<T, Output = T>
        + for<'a> AddAssign<&'a T>
        + for<'a> SubAssign<&'a T>
        + for<'a> MulAssign<&'a T>
{
}
