//! Numeric trait bounds shared by every generic container in this crate.
//!
//! Keys, weights, and z-indices are all "small unsigned integers" in the
//! sense of the specification; this module collects the exact bound each of
//! them needs into one trait so call sites don't repeat a long `where`
//! clause. Grounded on the same pattern as
//! `earth-metabolome-initiative-geometric-traits/src/traits/numeric.rs`.

use core::fmt::Debug;
use core::hash::Hash;
use core::ops::{AddAssign, SubAssign};
use num_traits::{Bounded, SaturatingAdd, Unsigned};

/// Trait for types usable as keys, weights, or z-indices throughout this
/// crate: an unsigned integer that is `Copy`, totally ordered, hashable,
/// convertible to/from `usize`, saturating-addable, and has a maximum value.
pub trait PositiveInteger:
    Unsigned
    + Copy
    + Eq
    + Ord
    + Hash
    + Debug
    + Bounded
    + AddAssign
    + SubAssign
    + SaturatingAdd
    + TryFrom<usize>
    + TryInto<usize>
{
}

impl<
    T: Unsigned
        + Copy
        + Eq
        + Ord
        + Hash
        + Debug
        + Bounded
        + AddAssign
        + SubAssign
        + SaturatingAdd
        + TryFrom<usize>
        + TryInto<usize>,
> PositiveInteger for T
{
}

/// Converts a [`PositiveInteger`] into a `usize` index.
///
/// Panics if the conversion cannot succeed, which would only happen on a
/// 16-bit target with a 64-bit key type — not a configuration this crate
/// targets.
#[inline]
pub fn to_usize<T: PositiveInteger>(value: T) -> usize {
    match value.try_into() {
        Ok(v) => v,
        Err(_) => panic!("numeric key does not fit in usize on this target"),
    }
}

/// Converts a `usize` index into a [`PositiveInteger`], returning `None` if
/// it doesn't fit (e.g. a `u8` key space indexed past 255).
#[inline]
pub fn from_usize<T: PositiveInteger>(value: usize) -> Option<T> {
    T::try_from(value).ok()
}
