//! Python bindings for radical-field.
//!
//! Exposes `QuadraticElement2` to Python using PyO3. Enable the `python`
//! feature to use this.

use num_bigint::BigInt;
use num_traits::{ToPrimitive, Zero};
use pyo3::basic::CompareOp;
use pyo3::exceptions::{PyTypeError, PyValueError};
use pyo3::prelude::*;

use crate::error::Error;
use crate::object::element::hash_of;
use crate::QuadraticInt2;

/// An element `a + b√2` of Z[√2] with Python integer coefficients.
#[pyclass(
    name = "QuadraticElement2",
    module = "radicalfield._quadraticelement2",
    frozen
)]
#[derive(Clone)]
pub struct PyQuadraticElement2 {
    inner: QuadraticInt2<BigInt>,
}

fn exact(value: Option<&PyAny>) -> PyResult<BigInt> {
    match value {
        None => Ok(BigInt::zero()),
        Some(v) => v.extract::<BigInt>().map_err(|_| {
            let name = v.get_type().name().unwrap_or("object");
            PyTypeError::new_err(Error::conversion(name).to_string())
        }),
    }
}

// Elements and Python ints take part in arithmetic, anything else is NotImplemented
fn operand(value: &PyAny) -> Option<QuadraticInt2<BigInt>> {
    if let Ok(e) = value.extract::<PyQuadraticElement2>() {
        return Some(e.inner);
    }
    value.extract::<BigInt>().ok().map(QuadraticInt2::from)
}

impl PyQuadraticElement2 {
    fn wrap(py: Python<'_>, inner: QuadraticInt2<BigInt>) -> PyObject {
        PyQuadraticElement2 { inner }.into_py(py)
    }
}

#[pymethods]
impl PyQuadraticElement2 {
    #[new]
    #[pyo3(signature = (a=None, b=None))]
    fn new(a: Option<&PyAny>, b: Option<&PyAny>) -> PyResult<Self> {
        let a = exact(a)?;
        let b = exact(b)?;
        Ok(PyQuadraticElement2 {
            inner: QuadraticInt2::new(a, b),
        })
    }

    /// The rational part
    #[getter]
    fn a(&self) -> BigInt {
        self.inner.a().clone()
    }

    /// The coefficient of √2
    #[getter]
    fn b(&self) -> BigInt {
        self.inner.b().clone()
    }

    /// The algebraic norm `a² - 2b²`
    fn norm(&self) -> BigInt {
        self.inner.norm()
    }

    /// The conjugate `a - b√2`
    fn conjugate(&self) -> Self {
        PyQuadraticElement2 {
            inner: self.inner.conj_ref(),
        }
    }

    fn __add__(&self, py: Python<'_>, other: &PyAny) -> PyObject {
        match operand(other) {
            Some(rhs) => Self::wrap(py, &self.inner + &rhs),
            None => py.NotImplemented(),
        }
    }

    fn __radd__(&self, py: Python<'_>, other: &PyAny) -> PyObject {
        match operand(other) {
            Some(lhs) => Self::wrap(py, &lhs + &self.inner),
            None => py.NotImplemented(),
        }
    }

    fn __sub__(&self, py: Python<'_>, other: &PyAny) -> PyObject {
        match operand(other) {
            Some(rhs) => Self::wrap(py, &self.inner - &rhs),
            None => py.NotImplemented(),
        }
    }

    fn __rsub__(&self, py: Python<'_>, other: &PyAny) -> PyObject {
        match operand(other) {
            Some(lhs) => Self::wrap(py, &lhs - &self.inner),
            None => py.NotImplemented(),
        }
    }

    fn __mul__(&self, py: Python<'_>, other: &PyAny) -> PyObject {
        match operand(other) {
            Some(rhs) => Self::wrap(py, &self.inner * &rhs),
            None => py.NotImplemented(),
        }
    }

    fn __rmul__(&self, py: Python<'_>, other: &PyAny) -> PyObject {
        match operand(other) {
            Some(lhs) => Self::wrap(py, &lhs * &self.inner),
            None => py.NotImplemented(),
        }
    }

    fn __neg__(&self) -> Self {
        PyQuadraticElement2 {
            inner: -&self.inner,
        }
    }

    fn __richcmp__(&self, py: Python<'_>, other: &PyAny, op: CompareOp) -> PyObject {
        match operand(other) {
            Some(rhs) => op.matches(self.inner.cmp(&rhs)).into_py(py),
            None => py.NotImplemented(),
        }
    }

    // integer elements compare equal to Python ints and must hash like them
    fn __hash__(&self, py: Python<'_>) -> PyResult<isize> {
        if self.inner.is_integer() {
            self.inner.a().to_object(py).as_ref(py).hash()
        } else {
            Ok(hash_of(&self.inner) as isize)
        }
    }

    fn __int__(&self) -> PyResult<BigInt> {
        if self.inner.is_integer() {
            Ok(self.inner.a().clone())
        } else {
            let err = Error::NotInteger {
                value: self.inner.to_string(),
            };
            Err(PyValueError::new_err(err.to_string()))
        }
    }

    fn __float__(&self) -> f64 {
        self.inner.to_f64().unwrap_or(f64::NAN)
    }

    fn __str__(&self) -> String {
        self.inner.to_string()
    }

    fn __repr__(&self) -> String {
        format!("QuadraticElement2({}, {})", self.inner.a(), self.inner.b())
    }
}

/// The `radicalfield._quadraticelement2` extension module.
#[pymodule]
fn _quadraticelement2(_py: Python<'_>, m: &PyModule) -> PyResult<()> {
    m.add_class::<PyQuadraticElement2>()?;
    Ok(())
}
