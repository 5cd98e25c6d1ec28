//! Error types for the radical-field crate.
//!
//! Ring arithmetic is total, so every variant here comes from either
//! converting an input into the exact integer type or from the host object
//! model (allocation, argument parsing, attribute access, dispatch).

use thiserror::Error;

/// The main error type for the radical-field crate.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    // ============ Conversion Errors ============
    /// A constructor argument has no exact integer conversion.
    #[error("cannot convert a value of type `{type_name}` to an exact integer")]
    Conversion {
        /// Name of the offending value's type.
        type_name: String,
    },

    /// The element has a non-zero radical part and is not an integer.
    #[error("{value} is not an integer (radical coefficient is non-zero)")]
    NotInteger {
        /// Display form of the element.
        value: String,
    },

    // ============ Host Object Errors ============
    /// The host refused to allocate an object envelope.
    #[error("cannot allocate {size} bytes for `{type_name}`")]
    Allocation {
        /// Name of the type being allocated.
        type_name: &'static str,
        /// Requested envelope size.
        size: usize,
    },

    /// More positional arguments than the constructor accepts.
    #[error("{type_name}() takes at most {max} positional arguments ({given} given)")]
    TooManyArguments {
        /// Name of the type being constructed.
        type_name: &'static str,
        /// Number of accepted positional arguments.
        max: usize,
        /// Number of positional arguments passed.
        given: usize,
    },

    /// A keyword argument the constructor does not know.
    #[error("{type_name}() got an unexpected keyword argument `{keyword}`")]
    UnexpectedKeyword {
        /// Name of the type being constructed.
        type_name: &'static str,
        /// The unknown keyword.
        keyword: String,
    },

    /// An argument was given both positionally and by keyword.
    #[error("argument `{keyword}` given by name and position")]
    DuplicateArgument {
        /// The keyword passed twice.
        keyword: &'static str,
    },

    /// Lookup of an attribute the type does not expose.
    #[error("`{type_name}` object has no attribute `{name}`")]
    UnknownAttribute {
        /// Name of the object's type.
        type_name: &'static str,
        /// The requested attribute.
        name: String,
    },

    /// Attempt to assign an attribute of an immutable object.
    #[error("attribute `{name}` of `{type_name}` objects is not writable")]
    ReadOnlyAttribute {
        /// Name of the object's type.
        type_name: &'static str,
        /// The attribute.
        name: String,
    },

    /// Read of a slot already released by the collector's clear hook.
    #[error("attribute `{name}` was cleared")]
    ClearedAttribute {
        /// The cleared attribute.
        name: &'static str,
    },

    /// Operator dispatch found no implementation for the operand types.
    #[error("unsupported operand type(s) for {op}: `{lhs}` and `{rhs}`")]
    UnsupportedOperands {
        /// Operator symbol.
        op: &'static str,
        /// Left operand's type name.
        lhs: &'static str,
        /// Right operand's type name.
        rhs: &'static str,
    },

    /// Unary operator applied to a type that does not implement it.
    #[error("bad operand type for {op}: `{operand}`")]
    UnsupportedOperand {
        /// Operator symbol.
        op: &'static str,
        /// The operand's type name.
        operand: &'static str,
    },

    /// Hash requested for a value of a type that has none.
    #[error("unhashable type: `{type_name}`")]
    Unhashable {
        /// Name of the value's type.
        type_name: &'static str,
    },

    /// A module already holds a type under this name.
    #[error("module `{module}` already has a member named `{name}`")]
    DuplicateType {
        /// Name of the module.
        module: String,
        /// The clashing member name.
        name: &'static str,
    },
}

/// A specialized `Result` type for radical-field operations.
pub type Result<T, E = Error> = std::result::Result<T, E>;

impl Error {
    /// Create a new `Conversion` error.
    #[must_use]
    pub fn conversion(type_name: impl Into<String>) -> Self {
        Self::Conversion {
            type_name: type_name.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::conversion("float");
        assert!(err.to_string().contains("`float`"));
        assert!(err.to_string().contains("exact integer"));

        let err = Error::TooManyArguments {
            type_name: "QuadraticElement2",
            max: 2,
            given: 3,
        };
        assert_eq!(
            err.to_string(),
            "QuadraticElement2() takes at most 2 positional arguments (3 given)"
        );

        let err = Error::UnsupportedOperands {
            op: "*",
            lhs: "QuadraticElement2",
            rhs: "str",
        };
        assert!(err.to_string().contains("for *"));
    }

    #[test]
    fn test_error_equality() {
        assert_eq!(Error::conversion("str"), Error::conversion("str"));
        assert_ne!(Error::conversion("str"), Error::conversion("float"));
    }
}
