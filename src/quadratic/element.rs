//! Implementation of the quadratic integer ring Z[√2]

use super::pairing::{cantor_depair_raw, cantor_pair_raw, fold, unfold_raw};
use super::QuadraticBase;
use crate::error::Result;
use crate::traits::{Approximation, IntoExact};
use core::cmp::Ordering;
use core::hash::{Hash, Hasher};
use core::ops::{Add, Mul, Neg, Sub};
use num_integer::{sqrt, Integer};
use num_traits::{One, RefNum, Signed, ToPrimitive, Zero};
use std::fmt;

/// An element `a + b√2` of the quadratic integer ring Z[√2].
///
/// Both coefficients are stored as-is: every element has exactly one
/// representation, so equality and hashing are structural. All arithmetic
/// returns a fresh value and never mutates its operands.
///
/// With a machine integer `T`, [norm](Self::norm), ordering, sign and
/// [to_integer](Self::to_integer) form `2b²`-sized intermediates and overflow
/// once a coefficient exceeds `√(T::MAX / 2)` (about `2·10⁹` for `i64`).
/// Use `BigInt` for unbounded coefficients.
#[derive(Clone, Debug, Copy, Default, PartialEq, Eq)]
pub struct QuadraticInt2<T> {
    a: T, // rational part
    b: T, // coefficient of √2
}

impl<T> QuadraticInt2<T> {
    #[inline]
    pub const fn new(a: T, b: T) -> Self {
        QuadraticInt2 { a, b }
    }

    /// Get return-only references to the components `(a, b)`
    #[inline]
    pub const fn parts(&self) -> (&T, &T) {
        (&self.a, &self.b)
    }

    /// The rational part `a`
    #[inline]
    pub const fn a(&self) -> &T {
        &self.a
    }

    /// The coefficient `b` of √2
    #[inline]
    pub const fn b(&self) -> &T {
        &self.b
    }
}

impl<T: Zero> QuadraticInt2<T> {
    /// Build an element from optional coefficients, each defaulting to zero.
    ///
    /// Both inputs are converted before anything is bound. If `b` fails to
    /// convert, the already converted `a` is dropped before the error is
    /// returned, so no partially built element is ever observable.
    pub fn try_from_parts<A, B>(a: Option<A>, b: Option<B>) -> Result<Self>
    where
        A: IntoExact<T>,
        B: IntoExact<T>,
    {
        let a = match a {
            Some(v) => v.into_exact()?,
            None => T::zero(),
        };
        let b = match b {
            Some(v) => v.into_exact()?,
            None => T::zero(),
        };
        Ok(QuadraticInt2::new(a, b))
    }
}

impl<T: Integer> QuadraticInt2<T> {
    /// Determine if the element is an integer (i.e. b = 0)
    #[inline]
    pub fn is_integer(&self) -> bool {
        self.b.is_zero()
    }

    /// Determine if the element has no rational part (i.e. a = 0, b != 0)
    #[inline]
    pub fn is_pure(&self) -> bool {
        self.a.is_zero() && !self.b.is_zero()
    }
}

impl<T: Integer> From<T> for QuadraticInt2<T> {
    /// Create a `QuadraticInt2` representation of an integer.
    #[inline]
    fn from(t: T) -> Self {
        QuadraticInt2 { a: t, b: T::zero() }
    }
}

impl<T> Into<(T, T)> for QuadraticInt2<T> {
    /// Deconstruct the element `a + b√2` into tuple `(a, b)`
    fn into(self) -> (T, T) {
        (self.a, self.b)
    }
}

impl<T: QuadraticBase> QuadraticInt2<T>
where
    for<'r> &'r T: RefNum<T>,
{
    /// Return the conjugate of the element, i.e. `a - b√2`
    #[inline]
    pub fn conj(self) -> Self {
        QuadraticInt2 {
            a: self.a,
            b: -self.b,
        }
    }

    /// `.conj()` with reference
    #[inline]
    pub fn conj_ref(&self) -> Self {
        QuadraticInt2::new(self.a.clone(), -self.b.clone())
    }

    /// Get the algebraic norm `a² - 2b²`, which is the product of the element and its conjugate
    #[inline]
    pub fn norm(&self) -> T {
        let two = T::one() + T::one();
        &self.a * &self.a - two * &self.b * &self.b
    }

    /// Determine if the element is a unit of the ring, i.e. its norm is ±1
    #[inline]
    pub fn is_unit(&self) -> bool {
        self.norm().abs().is_one()
    }

    /// Test if the element is positive
    pub fn is_positive(&self) -> bool {
        // a + b√2 > 0  <=>  2b|b| > -a|a|
        self.signum_key().is_positive()
    }

    /// Test if the element is negative
    pub fn is_negative(&self) -> bool {
        self.signum_key().is_negative()
    }

    // a|a| + 2b|b| has the same sign as a + b√2
    #[inline]
    fn signum_key(&self) -> T {
        let two = T::one() + T::one();
        &self.a * self.a.abs() + two * &self.b * self.b.abs()
    }

    /// Converts to an integer, rounding towards zero
    pub fn to_integer(&self) -> Approximation<T> {
        if self.b.is_zero() {
            return Approximation::Exact(self.a.clone());
        }

        // ⌊|b|√2⌋, the root is never exact as √2 is irrational
        let two = T::one() + T::one();
        let br = sqrt(two * &self.b * &self.b);
        let trunc = match (self.b.is_positive(), self.is_positive()) {
            (true, true) => &self.a + br,
            (true, false) => &self.a + br + T::one(),
            (false, true) => &self.a - br - T::one(),
            (false, false) => &self.a - br,
        };
        Approximation::Approximated(trunc)
    }

    /// Index of the element under the bijection `Z[√2] → Z`.
    ///
    /// Each coefficient is folded onto `N₀`, the two are Cantor paired and
    /// the result is unfolded back onto `Z`, so zero maps to zero.
    pub fn to_index(&self) -> T {
        unfold_raw::<T>(&cantor_pair_raw::<T>(&fold::<T>(&self.a), &fold::<T>(&self.b)))
    }

    /// Inverse of [to_index](Self::to_index)
    pub fn from_index(index: &T) -> Self {
        let (a, b) = cantor_depair_raw::<T>(&fold::<T>(index));
        QuadraticInt2::new(unfold_raw::<T>(&a), unfold_raw::<T>(&b))
    }
}

impl<T: QuadraticBase> PartialOrd for QuadraticInt2<T>
where
    for<'r> &'r T: RefNum<T>,
{
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T: QuadraticBase> Ord for QuadraticInt2<T>
where
    for<'r> &'r T: RefNum<T>,
{
    // a + b√2 < c + d√2  <=>  (b-d)√2 < c-a  <=>  2(b-d)|b-d| < (c-a)|c-a|
    // REF: https://math.stackexchange.com/a/2347212
    fn cmp(&self, other: &Self) -> Ordering {
        let l = &self.b - &other.b;
        let r = &other.a - &self.a;
        let two = T::one() + T::one();
        let lhs = two * &l * l.abs();
        let rhs = &r * r.abs();
        lhs.cmp(&rhs)
    }
}

impl<T: QuadraticBase + Hash> Hash for QuadraticInt2<T>
where
    for<'r> &'r T: RefNum<T>,
{
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.to_index().hash(state)
    }
}

// Implements the owned and mixed reference forms of a binary operator on top
// of the `&lhs op &rhs` implementation
macro_rules! forward_ref_binop {
    (impl $imp:ident, $method:ident) => {
        impl<T: QuadraticBase> $imp<QuadraticInt2<T>> for QuadraticInt2<T>
        where
            for<'r> &'r T: RefNum<T>,
        {
            type Output = QuadraticInt2<T>;
            #[inline]
            fn $method(self, rhs: QuadraticInt2<T>) -> QuadraticInt2<T> {
                (&self).$method(&rhs)
            }
        }

        impl<'a, T: QuadraticBase> $imp<&'a QuadraticInt2<T>> for QuadraticInt2<T>
        where
            for<'r> &'r T: RefNum<T>,
        {
            type Output = QuadraticInt2<T>;
            #[inline]
            fn $method(self, rhs: &QuadraticInt2<T>) -> QuadraticInt2<T> {
                (&self).$method(rhs)
            }
        }

        impl<'a, T: QuadraticBase> $imp<QuadraticInt2<T>> for &'a QuadraticInt2<T>
        where
            for<'r> &'r T: RefNum<T>,
        {
            type Output = QuadraticInt2<T>;
            #[inline]
            fn $method(self, rhs: QuadraticInt2<T>) -> QuadraticInt2<T> {
                self.$method(&rhs)
            }
        }
    };
}

impl<'a, 'b, T: QuadraticBase> Add<&'b QuadraticInt2<T>> for &'a QuadraticInt2<T>
where
    for<'r> &'r T: RefNum<T>,
{
    type Output = QuadraticInt2<T>;
    #[inline]
    fn add(self, rhs: &QuadraticInt2<T>) -> QuadraticInt2<T> {
        QuadraticInt2::new(&self.a + &rhs.a, &self.b + &rhs.b)
    }
}

impl<'a, 'b, T: QuadraticBase> Sub<&'b QuadraticInt2<T>> for &'a QuadraticInt2<T>
where
    for<'r> &'r T: RefNum<T>,
{
    type Output = QuadraticInt2<T>;
    #[inline]
    fn sub(self, rhs: &QuadraticInt2<T>) -> QuadraticInt2<T> {
        QuadraticInt2::new(&self.a - &rhs.a, &self.b - &rhs.b)
    }
}

impl<'a, 'b, T: QuadraticBase> Mul<&'b QuadraticInt2<T>> for &'a QuadraticInt2<T>
where
    for<'r> &'r T: RefNum<T>,
{
    type Output = QuadraticInt2<T>;

    // (a1 + b1√2)(a2 + b2√2) = (a1a2 + 2b1b2) + (a1b2 + a2b1)√2
    #[inline]
    fn mul(self, rhs: &QuadraticInt2<T>) -> QuadraticInt2<T> {
        let aa = &self.a * &rhs.a;
        let bb = &self.b * &rhs.b;
        let ab = &self.a * &rhs.b;
        let ba = &rhs.a * &self.b;
        let two = T::one() + T::one();
        QuadraticInt2::new(aa + two * bb, ab + ba)
    }
}

forward_ref_binop!(impl Add, add);
forward_ref_binop!(impl Sub, sub);
forward_ref_binop!(impl Mul, mul);

// Abstracts the (a + b√2) `op` c = (a `op` c) + b√2 pattern
macro_rules! scalar_impl {
    (impl $imp:ident, $method:ident) => {
        impl<T: QuadraticBase> $imp<T> for QuadraticInt2<T>
        where
            for<'r> &'r T: RefNum<T>,
        {
            type Output = QuadraticInt2<T>;
            #[inline]
            fn $method(self, rhs: T) -> QuadraticInt2<T> {
                QuadraticInt2::new(self.a.$method(rhs), self.b)
            }
        }
    };
}

scalar_impl!(impl Add, add);
scalar_impl!(impl Sub, sub);

impl<T: QuadraticBase> Mul<T> for QuadraticInt2<T>
where
    for<'r> &'r T: RefNum<T>,
{
    type Output = QuadraticInt2<T>;
    #[inline]
    fn mul(self, rhs: T) -> QuadraticInt2<T> {
        QuadraticInt2::new(self.a * &rhs, self.b * rhs)
    }
}

impl<T: QuadraticBase> Neg for QuadraticInt2<T>
where
    for<'r> &'r T: RefNum<T>,
{
    type Output = QuadraticInt2<T>;
    #[inline]
    fn neg(self) -> QuadraticInt2<T> {
        QuadraticInt2::new(-self.a, -self.b)
    }
}

impl<'a, T: QuadraticBase> Neg for &'a QuadraticInt2<T>
where
    for<'r> &'r T: RefNum<T>,
{
    type Output = QuadraticInt2<T>;
    #[inline]
    fn neg(self) -> QuadraticInt2<T> {
        QuadraticInt2::new(-self.a.clone(), -self.b.clone())
    }
}

impl<T: QuadraticBase> Zero for QuadraticInt2<T>
where
    for<'r> &'r T: RefNum<T>,
{
    #[inline]
    fn zero() -> Self {
        QuadraticInt2::new(T::zero(), T::zero())
    }
    #[inline]
    fn is_zero(&self) -> bool {
        self.a.is_zero() && self.b.is_zero()
    }
}

impl<T: QuadraticBase> One for QuadraticInt2<T>
where
    for<'r> &'r T: RefNum<T>,
{
    #[inline]
    fn one() -> Self {
        QuadraticInt2::new(T::one(), T::zero())
    }
    #[inline]
    fn is_one(&self) -> bool {
        self.a.is_one() && self.b.is_zero()
    }
}

impl<T: QuadraticBase + ToPrimitive> ToPrimitive for QuadraticInt2<T>
where
    for<'r> &'r T: RefNum<T>,
{
    #[inline]
    fn to_i64(&self) -> Option<i64> {
        match self.to_integer() {
            Approximation::Exact(v) => v.to_i64(),
            Approximation::Approximated(_) => None,
        }
    }

    #[inline]
    fn to_u64(&self) -> Option<u64> {
        match self.to_integer() {
            Approximation::Exact(v) => v.to_u64(),
            Approximation::Approximated(_) => None,
        }
    }

    #[inline]
    fn to_f64(&self) -> Option<f64> {
        Some(self.a.to_f64()? + self.b.to_f64()? * std::f64::consts::SQRT_2)
    }
}

impl<T: Integer + Signed + fmt::Display> fmt::Display for QuadraticInt2<T> {
    /// Formats as `a+b√2`, or as LaTeX `a+b\sqrt{2}` if the alternate flag is set
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let root = if f.alternate() { "\\sqrt{2}" } else { "√2" };
        if self.b.is_negative() {
            write!(f, "{}{}{}", self.a, self.b, root)
        } else {
            write!(f, "{}+{}{}", self.a, self.b, root)
        }
    }
}
