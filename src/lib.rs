//! Exact arithmetic in the quadratic integer ring Z[√2], and its binding as an
//! immutable, reference-counted object type of a managed host.

pub mod error;
pub mod object;
pub mod quadratic;
pub mod traits;

#[cfg(feature = "python")]
pub mod python;

mod proptests;

pub use error::{Error, Result};
pub use object::{HostValue, Module, QuadraticElement2};
pub use quadratic::QuadraticInt2;
pub use traits::{Approximation, IntoExact};
