//! Data structures and algorithms implementations related to
//! quadratic integers (elements of the ring Z[√2]).

pub mod element;
pub mod pairing;

use num_integer::{Integer, Roots};
use num_traits::{NumRef, Signed};

/// A helper trait to define valid type that can be used for QuadraticInt2
pub trait QuadraticBase: Integer + NumRef + Clone + Roots + Signed {}
impl<T: Integer + NumRef + Clone + Roots + Signed> QuadraticBase for T {}

pub use element::QuadraticInt2;
