//! The host envelope of a [QuadraticInt2] with `BigInt` coefficients.
//!
//! Life cycle of an envelope:
//!
//! 1. both arguments are resolved to owned integer references
//! 2. the envelope is reserved from the type's allocator
//! 3. both slots are bound in the same step, the object is live
//! 4. the last `Arc` is dropped (or the collector calls [Trace::clear])
//! 5. `Drop` releases whatever is still bound and returns the reservation
//!
//! A failure in step 1 or 2 releases every reference acquired so far, in
//! reverse order, before the error reaches the caller.

use core::alloc::Layout;
use core::hash::{Hash, Hasher};
use core::ops::ControlFlow;
use log::trace;
use num_bigint::BigInt;
use num_traits::{ToPrimitive, Zero};
use std::collections::hash_map::DefaultHasher;
use std::fmt;
use std::sync::Arc;

use super::gc::{visit_slot, OwnedRef, Trace, Visit};
use super::module::TypeObject;
use super::value::HostValue;
use crate::error::{Error, Result};
use crate::quadratic::QuadraticInt2;
use crate::traits::IntoExact;

/// Host object wrapping an element `a + b√2` of Z[√2].
///
/// The slots are `None` only after the collector cleared them.
#[derive(Debug)]
pub struct QuadraticElement2 {
    ty: Arc<TypeObject>,
    a: Option<Arc<BigInt>>,
    b: Option<Arc<BigInt>>,
}

impl QuadraticElement2 {
    pub const NAME: &'static str = "QuadraticElement2";
    pub const QUALIFIED_NAME: &'static str = "radicalfield._quadraticelement2.QuadraticElement2";
    /// Constructor keywords, in positional order
    pub const KEYWORDS: [&'static str; 2] = ["a", "b"];

    #[inline]
    pub fn layout() -> Layout {
        Layout::new::<QuadraticElement2>()
    }

    /// The type's `tp_new` slot: build an element from optional `a`, `b`
    /// arguments, each defaulting to zero.
    pub fn new(
        ty: &Arc<TypeObject>,
        a: Option<&HostValue>,
        b: Option<&HostValue>,
    ) -> Result<Arc<Self>> {
        let a = resolve(a)?;
        let b = resolve(b)?; // drops `a` on failure
        Self::bind(ty, a, b)
    }

    /// Wrap a computed value in a new envelope of type `ty`
    pub fn from_value(ty: &Arc<TypeObject>, value: QuadraticInt2<BigInt>) -> Result<Arc<Self>> {
        let (a, b): (BigInt, BigInt) = value.into();
        Self::bind(ty, Arc::new(a), Arc::new(b))
    }

    fn bind(ty: &Arc<TypeObject>, a: Arc<BigInt>, b: Arc<BigInt>) -> Result<Arc<Self>> {
        ty.allocator().allocate(Self::NAME, Self::layout())?;
        trace!("bound {}({}, {})", Self::NAME, a, b);
        Ok(Arc::new(QuadraticElement2 {
            ty: Arc::clone(ty),
            a: Some(a),
            b: Some(b),
        }))
    }

    #[inline]
    pub fn type_object(&self) -> &Arc<TypeObject> {
        &self.ty
    }

    /// The rational part `a`
    pub fn a(&self) -> Result<&Arc<BigInt>> {
        self.a.as_ref().ok_or(Error::ClearedAttribute { name: "a" })
    }

    /// The coefficient `b` of √2
    pub fn b(&self) -> Result<&Arc<BigInt>> {
        self.b.as_ref().ok_or(Error::ClearedAttribute { name: "b" })
    }

    /// Copy the coefficients out into a plain value for arithmetic
    pub fn value(&self) -> Result<QuadraticInt2<BigInt>> {
        Ok(QuadraticInt2::new(
            BigInt::clone(self.a()?),
            BigInt::clone(self.b()?),
        ))
    }

    /// Read-only attribute access, shares the stored reference
    pub fn getattr(&self, name: &str) -> Result<HostValue> {
        match name {
            "a" => self.a().map(|v| HostValue::Int(Arc::clone(v))),
            "b" => self.b().map(|v| HostValue::Int(Arc::clone(v))),
            _ => Err(Error::UnknownAttribute {
                type_name: Self::NAME,
                name: name.to_owned(),
            }),
        }
    }

    /// Attribute assignment, always refused: the type is immutable
    pub fn setattr(&self, name: &str, _value: HostValue) -> Result<()> {
        if Self::KEYWORDS.contains(&name) {
            Err(Error::ReadOnlyAttribute {
                type_name: Self::NAME,
                name: name.to_owned(),
            })
        } else {
            Err(Error::UnknownAttribute {
                type_name: Self::NAME,
                name: name.to_owned(),
            })
        }
    }

    pub fn add(&self, rhs: &Self) -> Result<Arc<Self>> {
        Self::from_value(&self.ty, self.value()? + rhs.value()?)
    }

    pub fn sub(&self, rhs: &Self) -> Result<Arc<Self>> {
        Self::from_value(&self.ty, self.value()? - rhs.value()?)
    }

    pub fn mul(&self, rhs: &Self) -> Result<Arc<Self>> {
        Self::from_value(&self.ty, &self.value()? * &rhs.value()?)
    }

    pub fn neg(&self) -> Result<Arc<Self>> {
        Self::from_value(&self.ty, -self.value()?)
    }

    /// The `int` conversion, only defined when `b = 0`
    pub fn to_int(&self) -> Result<HostValue> {
        if self.b()?.is_zero() {
            Ok(HostValue::Int(Arc::clone(self.a()?)))
        } else {
            Err(Error::NotInteger {
                value: self.to_string(),
            })
        }
    }

    /// The `float` conversion, `a + b·√2` rounded to the nearest double
    pub fn to_float(&self) -> Result<HostValue> {
        let v = self.value()?.to_f64().unwrap_or(f64::NAN);
        Ok(HostValue::Float(v))
    }

    /// Field-wise equality
    pub fn equals(&self, rhs: &Self) -> Result<bool> {
        Ok(self.value()? == rhs.value()?)
    }

    /// Hash of the value, equal elements hash equal
    pub fn hash_value(&self) -> Result<u64> {
        Ok(hash_of(&self.value()?))
    }
}

pub(crate) fn hash_of(value: &QuadraticInt2<BigInt>) -> u64 {
    let mut state = DefaultHasher::new();
    value.hash(&mut state);
    state.finish()
}

#[inline]
fn resolve(arg: Option<&HostValue>) -> Result<Arc<BigInt>> {
    match arg {
        Some(v) => v.into_exact(),
        None => Ok(Arc::new(BigInt::zero())),
    }
}

impl Trace for QuadraticElement2 {
    fn traverse(&self, visit: &mut dyn Visit) -> ControlFlow<()> {
        if let ControlFlow::Break(()) = visit.visit(OwnedRef::new("type", &self.ty)) {
            return ControlFlow::Break(());
        }
        visit_slot!(visit, "a", self.a);
        visit_slot!(visit, "b", self.b);
        ControlFlow::Continue(())
    }

    // `take` empties each slot before its reference is released
    fn clear(&mut self) {
        let a = self.a.take();
        let b = self.b.take();
        if a.is_some() || b.is_some() {
            trace!("cleared {}", Self::NAME);
        }
    }
}

impl Drop for QuadraticElement2 {
    fn drop(&mut self) {
        self.clear();
        self.ty.allocator().deallocate(Self::NAME, Self::layout());
    }
}

impl fmt::Display for QuadraticElement2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.value() {
            Ok(v) => write!(f, "{}", v),
            Err(_) => write!(f, "<cleared {}>", Self::NAME),
        }
    }
}
