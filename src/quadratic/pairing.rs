//! Integer bijections between `Z`, `N₀` and `N₀²`.
//!
//! - [fold] / [unfold] map the integers onto the non-negative integers
//!   (`0, -1, 1, -2, 2, ...` becomes `0, 1, 2, 3, 4, ...`)
//! - [cantor_pair] / [cantor_depair] map pairs of non-negative integers
//!   onto the non-negative integers
//!
//! # References:
//! - <https://mathworld.wolfram.com/FoldingFunction.html>
//! - <https://en.wikipedia.org/wiki/Pairing_function#Cantor_pairing_function>

use num_integer::{sqrt, Integer, Roots};
use num_traits::{NumRef, RefNum, Signed};

/// Fold an integer onto the non-negative integers: `2i` if `i >= 0`, otherwise `2|i| - 1`.
pub fn fold<T: Integer + Signed + NumRef>(i: &T) -> T
where
    for<'r> &'r T: RefNum<T>,
{
    let two = T::one() + T::one();
    if i.is_negative() {
        -(two * i) - T::one()
    } else {
        two * i
    }
}

/// Inverse of [fold], returns `None` if `n` is negative.
pub fn unfold<T: Integer + Signed + NumRef>(n: &T) -> Option<T>
where
    for<'r> &'r T: RefNum<T>,
{
    if n.is_negative() {
        None
    } else {
        Some(unfold_raw::<T>(n))
    }
}

#[inline]
pub(crate) fn unfold_raw<T: Integer + Signed + NumRef>(n: &T) -> T
where
    for<'r> &'r T: RefNum<T>,
{
    let two = T::one() + T::one();
    if n.is_odd() {
        -((n + T::one()) / two)
    } else {
        n / two
    }
}

/// Cantor pairing `(x+y)(x+y+1)/2 + y`, returns `None` if either input is negative.
pub fn cantor_pair<T: Integer + Signed + NumRef>(x: &T, y: &T) -> Option<T>
where
    for<'r> &'r T: RefNum<T>,
{
    if x.is_negative() || y.is_negative() {
        None
    } else {
        Some(cantor_pair_raw::<T>(x, y))
    }
}

#[inline]
pub(crate) fn cantor_pair_raw<T: Integer + NumRef>(x: &T, y: &T) -> T
where
    for<'r> &'r T: RefNum<T>,
{
    let s = x + y;
    let t = &s * (&s + T::one()) / (T::one() + T::one());
    t + y
}

/// Inverse of [cantor_pair], returns `None` if `z` is negative.
pub fn cantor_depair<T: Integer + Signed + NumRef + Roots>(z: &T) -> Option<(T, T)>
where
    for<'r> &'r T: RefNum<T>,
{
    if z.is_negative() {
        None
    } else {
        Some(cantor_depair_raw::<T>(z))
    }
}

pub(crate) fn cantor_depair_raw<T: Integer + NumRef + Roots>(z: &T) -> (T, T)
where
    for<'r> &'r T: RefNum<T>,
{
    let two = T::one() + T::one();
    let eight = &two * &two * &two;
    let w = (sqrt(eight * z + T::one()) - T::one()) / &two;
    let t = (&w * &w + &w) / two;
    let y = z - t;
    (w - &y, y)
}
