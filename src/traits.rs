use core::any::type_name;
use num_bigint::BigInt;
use num_integer::Integer;
use num_rational::Ratio;
use num_traits::FromPrimitive;

use crate::error::{Error, Result};

#[derive(PartialEq, Debug)]
pub enum Approximation<T> {
    Approximated(T),
    Exact(T),
}

impl<T> Approximation<T> {
    /// Return the inner value, whether exact or not
    #[inline]
    pub fn value(self) -> T {
        match self {
            Approximation::Approximated(v) | Approximation::Exact(v) => v,
        }
    }

    #[inline]
    pub fn is_exact(&self) -> bool {
        matches!(self, Approximation::Exact(_))
    }
}

/// Conversion of an "integer-like" value into the exact integer type `T`.
///
/// This is the only fallible step in building a quadratic integer: every
/// value that can be losslessly interpreted as an integer converts, anything
/// else reports [Error::Conversion].
pub trait IntoExact<T> {
    fn into_exact(self) -> Result<T>;
}

macro_rules! impl_primitive_exact {
    ($($t:ty => $from:ident),*) => {$(
        impl<T: FromPrimitive> IntoExact<T> for $t {
            #[inline]
            fn into_exact(self) -> Result<T> {
                T::$from(self).ok_or_else(|| Error::conversion(type_name::<$t>()))
            }
        }
    )*};
}
impl_primitive_exact!(
    i8 => from_i8, i16 => from_i16, i32 => from_i32, i64 => from_i64, i128 => from_i128,
    u8 => from_u8, u16 => from_u16, u32 => from_u32, u64 => from_u64, u128 => from_u128,
    isize => from_isize, usize => from_usize
);

impl IntoExact<BigInt> for BigInt {
    #[inline]
    fn into_exact(self) -> Result<BigInt> {
        Ok(self)
    }
}

impl IntoExact<BigInt> for &BigInt {
    #[inline]
    fn into_exact(self) -> Result<BigInt> {
        Ok(self.clone())
    }
}

impl<T: Integer + Clone> IntoExact<T> for Ratio<T> {
    /// Only ratios with a unit denominator are integers
    #[inline]
    fn into_exact(self) -> Result<T> {
        if self.is_integer() {
            Ok(self.to_integer())
        } else {
            Err(Error::conversion(type_name::<Ratio<T>>()))
        }
    }
}
