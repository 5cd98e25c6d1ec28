//! Dynamically typed values exchanged with the host.

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Zero};
use std::fmt;
use std::sync::Arc;

use super::element::QuadraticElement2;
use crate::error::{Error, Result};
use crate::traits::IntoExact;

/// A host value. Every boxed variant is a counted reference: cloning the
/// value acquires a reference, dropping it releases one.
#[derive(Clone, Debug)]
pub enum HostValue {
    None,
    Bool(bool),
    Int(Arc<BigInt>),
    Ratio(Arc<BigRational>),
    Float(f64),
    Str(Arc<str>),
    Element(Arc<QuadraticElement2>),
}

impl HostValue {
    /// Create a new integer value
    pub fn int<T: Into<BigInt>>(v: T) -> Self {
        HostValue::Int(Arc::new(v.into()))
    }

    /// Create a new rational value `numer / denom`
    ///
    /// # Panics
    /// If `denom` is zero
    pub fn ratio<T: Into<BigInt>>(numer: T, denom: T) -> Self {
        HostValue::Ratio(Arc::new(BigRational::new(numer.into(), denom.into())))
    }

    pub fn str(s: &str) -> Self {
        HostValue::Str(Arc::from(s))
    }

    /// Name of the value's type as the host shows it
    pub fn type_name(&self) -> &'static str {
        match self {
            HostValue::None => "NoneType",
            HostValue::Bool(_) => "bool",
            HostValue::Int(_) => "int",
            HostValue::Ratio(_) => "Fraction",
            HostValue::Float(_) => "float",
            HostValue::Str(_) => "str",
            HostValue::Element(_) => QuadraticElement2::NAME,
        }
    }

    #[inline]
    pub fn as_element(&self) -> Option<&Arc<QuadraticElement2>> {
        match self {
            HostValue::Element(e) => Some(e),
            _ => None,
        }
    }

    #[inline]
    pub fn as_int(&self) -> Option<&Arc<BigInt>> {
        match self {
            HostValue::Int(i) => Some(i),
            _ => None,
        }
    }

    /// The integer an int-like value stands for in arithmetic, comparison
    /// and hashing. Accepts exactly what construction accepts: `int`, `bool`
    /// and fractions with a unit denominator.
    pub(crate) fn promote(&self) -> Option<BigInt> {
        match self {
            HostValue::Int(i) => Some(BigInt::clone(i)),
            HostValue::Bool(b) => Some(if *b { BigInt::one() } else { BigInt::zero() }),
            HostValue::Ratio(r) if r.is_integer() => Some(r.to_integer()),
            _ => None,
        }
    }
}

impl IntoExact<Arc<BigInt>> for &HostValue {
    /// An `int` argument is shared (its count is incremented), every other
    /// integer-like value is converted into a new integer
    fn into_exact(self) -> Result<Arc<BigInt>> {
        match self {
            HostValue::Int(i) => Ok(Arc::clone(i)),
            HostValue::Bool(b) => Ok(Arc::new(if *b { BigInt::one() } else { BigInt::zero() })),
            HostValue::Ratio(r) if r.is_integer() => Ok(Arc::new(r.to_integer())),
            other => Err(Error::conversion(other.type_name())),
        }
    }
}

impl From<Arc<QuadraticElement2>> for HostValue {
    #[inline]
    fn from(e: Arc<QuadraticElement2>) -> Self {
        HostValue::Element(e)
    }
}

impl fmt::Display for HostValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HostValue::None => write!(f, "None"),
            HostValue::Bool(true) => write!(f, "True"),
            HostValue::Bool(false) => write!(f, "False"),
            HostValue::Int(i) => write!(f, "{}", i),
            HostValue::Ratio(r) => write!(f, "{}", r),
            HostValue::Float(v) => write!(f, "{}", v),
            HostValue::Str(s) => write!(f, "{:?}", s),
            HostValue::Element(e) => write!(f, "{}", e),
        }
    }
}
