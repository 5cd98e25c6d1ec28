//! Integration of [QuadraticInt2](crate::QuadraticInt2) into a managed,
//! reference-counted object host.
//!
//! Values crossing the boundary are [HostValue]s. Every reference the host
//! hands out is an `Arc`: cloning it is an increment, dropping it a decrement,
//! so error paths release what they acquired without any explicit cleanup.
//! Objects that own references implement [Trace] for the host's cycle
//! collector, and envelopes are reserved from the [Allocator] of their type.

pub mod alloc;
pub mod element;
pub mod gc;
pub mod module;
pub mod value;

pub use alloc::{Allocator, LimitedAllocator, SystemAllocator};
pub use element::QuadraticElement2;
pub use gc::{owned_refs, OwnedRef, Trace, Visit};
pub use module::{
    binary_op, hash, init_module, module_exec, negate, quadratic_element2_type, rich_eq,
    BinaryOp, Module, TypeFlags, TypeObject, TypeSpec,
};
pub use value::HostValue;
