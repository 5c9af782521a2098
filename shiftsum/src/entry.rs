//! The element types a [`Matrix`](crate::matrix::Matrix) can hold.
//!
//! The search only ever adds entries together and compares the column sums to
//! the target, so an entry needs an additive identity and an addition that
//! reports when the result is no longer representable.

use num_bigint::BigInt;
use num_traits::{CheckedAdd, Zero};

/// An entry of a matrix.
pub trait Entry: 'static + Clone + PartialEq + std::fmt::Debug + std::fmt::Display {
    /// Returns the additive identity.
    fn zero() -> Self;

    /// Adds `rhs` to `self`, returning `None` if the sum overflows.
    fn checked_add(&self, rhs: &Self) -> Option<Self>;
}

macro_rules! impl_entry {
    ($($t:ty),*) => {
        $(
            impl Entry for $t {
                fn zero() -> Self {
                    Zero::zero()
                }

                fn checked_add(&self, rhs: &Self) -> Option<Self> {
                    CheckedAdd::checked_add(self, rhs)
                }
            }
        )*
    };
}

impl_entry!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

// Arbitrary precision entries never overflow.
impl Entry for BigInt {
    fn zero() -> Self {
        Zero::zero()
    }

    fn checked_add(&self, rhs: &Self) -> Option<Self> {
        Some(self + rhs)
    }
}
