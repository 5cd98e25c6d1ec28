//! Type objects, module registration and operator dispatch.

use core::ops::{BitOr, ControlFlow};
use log::debug;
use num_bigint::BigInt;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use super::alloc::{Allocator, SystemAllocator};
use super::element::{hash_of, QuadraticElement2};
use super::gc::{OwnedRef, Trace, Visit};
use super::value::HostValue;
use crate::error::{Error, Result};
use crate::quadratic::QuadraticInt2;

/// Flags describing how the host treats instances of a type.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TypeFlags(u32);

impl TypeFlags {
    pub const DEFAULT: TypeFlags = TypeFlags(1);
    /// Instances take part in cycle collection
    pub const HAVE_GC: TypeFlags = TypeFlags(1 << 1);
    /// The type object itself cannot be modified
    pub const IMMUTABLE_TYPE: TypeFlags = TypeFlags(1 << 2);

    #[inline]
    pub const fn contains(self, other: TypeFlags) -> bool {
        self.0 & other.0 == other.0
    }
}

impl BitOr for TypeFlags {
    type Output = TypeFlags;
    #[inline]
    fn bitor(self, rhs: TypeFlags) -> TypeFlags {
        TypeFlags(self.0 | rhs.0)
    }
}

impl fmt::Debug for TypeFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names = [
            (TypeFlags::DEFAULT, "DEFAULT"),
            (TypeFlags::HAVE_GC, "HAVE_GC"),
            (TypeFlags::IMMUTABLE_TYPE, "IMMUTABLE_TYPE"),
        ];
        let set: Vec<&str> = names
            .iter()
            .filter(|(flag, _)| self.contains(*flag))
            .map(|(_, name)| *name)
            .collect();
        write!(f, "TypeFlags({})", set.join(" | "))
    }
}

/// Constructor slot: receives the type being instantiated and the parsed
/// optional arguments, in keyword order.
pub type NewFn = fn(&Arc<TypeObject>, &[Option<&HostValue>]) -> Result<HostValue>;

/// Static description of a type, turned into a [TypeObject] by a module.
#[derive(Clone, Copy)]
pub struct TypeSpec {
    /// Fully qualified name, `package.module.Type`
    pub name: &'static str,
    pub basicsize: usize,
    pub flags: TypeFlags,
    /// Accepted constructor keywords, in positional order. All are optional.
    pub keywords: &'static [&'static str],
    pub new: NewFn,
}

/// A host type: name, flags, constructor and the allocator its instances use.
pub struct TypeObject {
    spec: TypeSpec,
    alloc: Arc<dyn Allocator>,
}

impl TypeObject {
    pub fn from_spec(spec: TypeSpec, alloc: Arc<dyn Allocator>) -> Arc<Self> {
        Arc::new(TypeObject { spec, alloc })
    }

    /// Short name, the part after the last `.`
    pub fn name(&self) -> &'static str {
        let name = self.spec.name;
        match name.rfind('.') {
            Some(i) => &name[i + 1..],
            None => name,
        }
    }

    #[inline]
    pub fn qualified_name(&self) -> &'static str {
        self.spec.name
    }

    #[inline]
    pub fn flags(&self) -> TypeFlags {
        self.spec.flags
    }

    #[inline]
    pub fn basicsize(&self) -> usize {
        self.spec.basicsize
    }

    #[inline]
    pub fn allocator(&self) -> &dyn Allocator {
        &*self.alloc
    }

    /// Instantiate the type with positional and keyword arguments.
    pub fn call(self: &Arc<Self>, args: &[HostValue], kwargs: &[(&str, HostValue)]) -> Result<HostValue> {
        let parsed = parse_args(self.name(), self.spec.keywords, args, kwargs)?;
        (self.spec.new)(self, &parsed)
    }
}

impl fmt::Debug for TypeObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeObject")
            .field("name", &self.spec.name)
            .field("flags", &self.spec.flags)
            .finish()
    }
}

// Resolve "|O..." style optional arguments: positionals first, then keywords,
// every slot at most once
fn parse_args<'a>(
    type_name: &'static str,
    keywords: &'static [&'static str],
    args: &'a [HostValue],
    kwargs: &'a [(&str, HostValue)],
) -> Result<Vec<Option<&'a HostValue>>> {
    if args.len() > keywords.len() {
        return Err(Error::TooManyArguments {
            type_name,
            max: keywords.len(),
            given: args.len(),
        });
    }

    let mut parsed: Vec<Option<&HostValue>> = vec![None; keywords.len()];
    for (slot, arg) in parsed.iter_mut().zip(args) {
        *slot = Some(arg);
    }
    for (key, value) in kwargs {
        let index = keywords
            .iter()
            .position(|k| k == key)
            .ok_or_else(|| Error::UnexpectedKeyword {
                type_name,
                keyword: (*key).to_owned(),
            })?;
        if parsed[index].is_some() {
            return Err(Error::DuplicateArgument {
                keyword: keywords[index],
            });
        }
        parsed[index] = Some(value);
    }
    Ok(parsed)
}

fn quadratic_element2_new(ty: &Arc<TypeObject>, args: &[Option<&HostValue>]) -> Result<HostValue> {
    let a = args.get(0).copied().flatten();
    let b = args.get(1).copied().flatten();
    QuadraticElement2::new(ty, a, b).map(HostValue::Element)
}

pub const QUADRATIC_ELEMENT2_SPEC: TypeSpec = TypeSpec {
    name: QuadraticElement2::QUALIFIED_NAME,
    basicsize: core::mem::size_of::<QuadraticElement2>(),
    flags: TypeFlags(TypeFlags::DEFAULT.0 | TypeFlags::HAVE_GC.0 | TypeFlags::IMMUTABLE_TYPE.0),
    keywords: &QuadraticElement2::KEYWORDS,
    new: quadratic_element2_new,
};

/// Create the `QuadraticElement2` type object allocating through `alloc`
pub fn quadratic_element2_type(alloc: Arc<dyn Allocator>) -> Arc<TypeObject> {
    TypeObject::from_spec(QUADRATIC_ELEMENT2_SPEC, alloc)
}

/// A named collection of type objects.
#[derive(Debug)]
pub struct Module {
    name: String,
    alloc: Arc<dyn Allocator>,
    types: BTreeMap<&'static str, Arc<TypeObject>>,
}

impl Module {
    pub const NAME: &'static str = "radicalfield._quadraticelement2";

    /// Create an empty module using the system allocator
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self::with_allocator(name, Arc::new(SystemAllocator))
    }

    /// Create an empty module whose types allocate through `alloc`
    pub fn with_allocator<S: Into<String>>(name: S, alloc: Arc<dyn Allocator>) -> Self {
        Module {
            name: name.into(),
            alloc,
            types: BTreeMap::new(),
        }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Register a type under its short name
    pub fn add_type(&mut self, ty: Arc<TypeObject>) -> Result<()> {
        let key = ty.name();
        if self.types.contains_key(key) {
            return Err(Error::DuplicateType {
                module: self.name.clone(),
                name: key,
            });
        }
        debug!("registered {} in module {}", ty.qualified_name(), self.name);
        self.types.insert(key, ty);
        Ok(())
    }

    /// Look up a member type by short name
    pub fn get(&self, name: &str) -> Option<&Arc<TypeObject>> {
        self.types.get(name)
    }

    pub fn types(&self) -> impl Iterator<Item = &Arc<TypeObject>> {
        self.types.values()
    }
}

impl Trace for Module {
    fn traverse(&self, visit: &mut dyn Visit) -> ControlFlow<()> {
        for ty in self.types.values() {
            if let ControlFlow::Break(()) = visit.visit(OwnedRef::new("type", ty)) {
                return ControlFlow::Break(());
            }
        }
        ControlFlow::Continue(())
    }

    fn clear(&mut self) {
        self.types.clear();
    }
}

/// Module initialisation: create the quadratic element type and add it.
pub fn module_exec(module: &mut Module) -> Result<()> {
    let ty = quadratic_element2_type(Arc::clone(&module.alloc));
    module.add_type(ty)
}

/// Create and initialise the `radicalfield._quadraticelement2` module
pub fn init_module() -> Result<Module> {
    let mut module = Module::new(Module::NAME);
    module_exec(&mut module)?;
    Ok(module)
}

/// Binary operators the element type implements.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
}

impl BinaryOp {
    pub fn symbol(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
        }
    }
}

/// Operator dispatch for the element type. Either operand may be an `int`,
/// a `bool` or an integral fraction, which is promoted to `n + 0√2`; the
/// result has the type of the element operand.
pub fn binary_op(op: BinaryOp, lhs: &HostValue, rhs: &HostValue) -> Result<HostValue> {
    let unsupported = || Error::UnsupportedOperands {
        op: op.symbol(),
        lhs: lhs.type_name(),
        rhs: rhs.type_name(),
    };
    let (ty, l, r) = match (lhs, rhs) {
        (HostValue::Element(x), HostValue::Element(y)) => (x.type_object(), x.value()?, y.value()?),
        (HostValue::Element(x), other) => {
            let n = other.promote().ok_or_else(unsupported)?;
            (x.type_object(), x.value()?, QuadraticInt2::from(n))
        }
        (other, HostValue::Element(y)) => {
            let n = other.promote().ok_or_else(unsupported)?;
            (y.type_object(), QuadraticInt2::from(n), y.value()?)
        }
        _ => return Err(unsupported()),
    };
    let result = match op {
        BinaryOp::Add => l + r,
        BinaryOp::Sub => l - r,
        BinaryOp::Mul => &l * &r,
    };
    QuadraticElement2::from_value(ty, result).map(HostValue::Element)
}

/// Unary negation of an element
pub fn negate(value: &HostValue) -> Result<HostValue> {
    match value {
        HostValue::Element(x) => x.neg().map(HostValue::Element),
        other => Err(Error::UnsupportedOperand {
            op: "unary -",
            operand: other.type_name(),
        }),
    }
}

// Value of an operand taking part in element comparisons
fn comparable(value: &HostValue) -> Result<Option<QuadraticInt2<BigInt>>> {
    match value {
        HostValue::Element(x) => x.value().map(Some),
        other => Ok(other.promote().map(QuadraticInt2::from)),
    }
}

/// Equality between an element and another element or an integer.
/// Values of other types never compare equal.
pub fn rich_eq(lhs: &HostValue, rhs: &HostValue) -> Result<bool> {
    if lhs.as_element().is_none() && rhs.as_element().is_none() {
        return Err(Error::UnsupportedOperands {
            op: "==",
            lhs: lhs.type_name(),
            rhs: rhs.type_name(),
        });
    }
    match (comparable(lhs)?, comparable(rhs)?) {
        (Some(l), Some(r)) => Ok(l == r),
        _ => Ok(false),
    }
}

/// Hash of an element or integer. An integer hashes like the element `n + 0√2`
/// it compares equal to.
pub fn hash(value: &HostValue) -> Result<u64> {
    match comparable(value)? {
        Some(v) => Ok(hash_of(&v)),
        None => Err(Error::Unhashable {
            type_name: value.type_name(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::alloc::LimitedAllocator;
    use crate::object::gc::owned_refs;

    fn element(module: &Module, a: i64, b: i64) -> HostValue {
        module
            .get(QuadraticElement2::NAME)
            .unwrap()
            .call(&[HostValue::int(a), HostValue::int(b)], &[])
            .unwrap()
    }

    #[test]
    fn flags_test() {
        let flags = TypeFlags::DEFAULT | TypeFlags::HAVE_GC;
        assert!(flags.contains(TypeFlags::HAVE_GC));
        assert!(!flags.contains(TypeFlags::IMMUTABLE_TYPE));
        assert_eq!(format!("{:?}", flags), "TypeFlags(DEFAULT | HAVE_GC)");
        assert!(QUADRATIC_ELEMENT2_SPEC
            .flags
            .contains(TypeFlags::HAVE_GC | TypeFlags::IMMUTABLE_TYPE));
    }

    #[test]
    fn module_test() {
        let mut module = init_module().unwrap();
        assert_eq!(module.name(), "radicalfield._quadraticelement2");

        let ty = module.get("QuadraticElement2").unwrap();
        assert_eq!(ty.name(), "QuadraticElement2");
        assert_eq!(ty.qualified_name(), QuadraticElement2::QUALIFIED_NAME);
        assert!(module.get("QuadraticInt2").is_none());

        assert!(matches!(
            module_exec(&mut module),
            Err(Error::DuplicateType { name: "QuadraticElement2", .. })
        ));

        let ty = module.get("QuadraticElement2").unwrap();
        assert_eq!(ty.basicsize(), core::mem::size_of::<QuadraticElement2>());
        let names: Vec<_> = module.types().map(|t| t.name()).collect();
        assert_eq!(names, vec!["QuadraticElement2"]);

        assert_eq!(owned_refs(&module).len(), 1);
        module.clear();
        assert_eq!(module.types().count(), 0);
        assert!(module.get("QuadraticElement2").is_none());
        assert!(owned_refs(&module).is_empty());
        module.clear();
    }

    #[test]
    fn call_test() {
        let module = init_module().unwrap();
        let ty = module.get("QuadraticElement2").unwrap();

        let zero = ty.call(&[], &[]).unwrap();
        assert!(rich_eq(&zero, &element(&module, 0, 0)).unwrap());

        let only_a = ty.call(&[HostValue::int(1)], &[]).unwrap();
        assert!(rich_eq(&only_a, &element(&module, 1, 0)).unwrap());

        let only_b = ty.call(&[], &[("b", HostValue::int(2))]).unwrap();
        assert!(rich_eq(&only_b, &element(&module, 0, 2)).unwrap());

        let mixed = ty.call(&[HostValue::int(1)], &[("b", HostValue::ratio(6, 3))]).unwrap();
        assert!(rich_eq(&mixed, &element(&module, 1, 2)).unwrap());

        assert_eq!(
            ty.call(&[HostValue::int(1), HostValue::int(2), HostValue::int(3)], &[]).unwrap_err(),
            Error::TooManyArguments {
                type_name: "QuadraticElement2",
                max: 2,
                given: 3
            }
        );
        assert!(matches!(
            ty.call(&[], &[("c", HostValue::int(1))]),
            Err(Error::UnexpectedKeyword { .. })
        ));
        assert_eq!(
            ty.call(&[HostValue::int(1)], &[("a", HostValue::int(1))]).unwrap_err(),
            Error::DuplicateArgument { keyword: "a" }
        );
        assert_eq!(
            ty.call(&[HostValue::Float(1.0), HostValue::int(2)], &[]).unwrap_err(),
            Error::conversion("float")
        );
        assert_eq!(
            ty.call(&[HostValue::int(1), HostValue::str("2")], &[]).unwrap_err(),
            Error::conversion("str")
        );
    }

    #[test]
    fn dispatch_test() {
        let module = init_module().unwrap();
        let x = element(&module, 1, 2);
        let y = element(&module, 3, 4);

        let sum = binary_op(BinaryOp::Add, &x, &y).unwrap();
        assert!(rich_eq(&sum, &element(&module, 4, 6)).unwrap());
        let prod = binary_op(BinaryOp::Mul, &x, &y).unwrap();
        assert!(rich_eq(&prod, &element(&module, 19, 10)).unwrap());
        let diff = binary_op(BinaryOp::Sub, &x, &y).unwrap();
        assert!(rich_eq(&diff, &element(&module, -2, -2)).unwrap());

        // int promotion, both sides
        let five = HostValue::int(5);
        assert!(rich_eq(&binary_op(BinaryOp::Add, &x, &five).unwrap(), &element(&module, 6, 2)).unwrap());
        assert!(rich_eq(&binary_op(BinaryOp::Add, &five, &x).unwrap(), &element(&module, 6, 2)).unwrap());
        assert!(rich_eq(&binary_op(BinaryOp::Sub, &five, &x).unwrap(), &element(&module, 4, -2)).unwrap());
        assert!(rich_eq(&binary_op(BinaryOp::Mul, &HostValue::int(3), &x).unwrap(), &element(&module, 3, 6)).unwrap());
        assert!(rich_eq(&negate(&x).unwrap(), &element(&module, -1, -2)).unwrap());

        assert_eq!(
            binary_op(BinaryOp::Mul, &x, &HostValue::str("2")).unwrap_err(),
            Error::UnsupportedOperands {
                op: "*",
                lhs: "QuadraticElement2",
                rhs: "str"
            }
        );
        assert!(binary_op(BinaryOp::Add, &x, &HostValue::Float(0.5)).is_err());

        // integral fractions promote like ints, others are unsupported
        let half = HostValue::ratio(1, 2);
        assert!(rich_eq(&binary_op(BinaryOp::Mul, &x, &HostValue::ratio(6, 2)).unwrap(), &element(&module, 3, 6)).unwrap());
        assert_eq!(
            binary_op(BinaryOp::Add, &half, &x).unwrap_err(),
            Error::UnsupportedOperands {
                op: "+",
                lhs: "Fraction",
                rhs: "QuadraticElement2"
            }
        );
        assert!(binary_op(BinaryOp::Add, &five, &five).is_err());
        assert!(negate(&five).is_err());
    }

    #[test]
    fn eq_hash_test() {
        let module = init_module().unwrap();
        let x = element(&module, 5, 0);
        let y = element(&module, 5, 1);

        assert!(rich_eq(&x, &HostValue::int(5)).unwrap());
        assert!(!rich_eq(&y, &HostValue::int(5)).unwrap());
        assert!(!rich_eq(&x, &HostValue::str("5")).unwrap());

        // a fraction accepted by the constructor compares and hashes as its integer
        let ty = module.get(QuadraticElement2::NAME).unwrap();
        let from_ratio = ty.call(&[HostValue::ratio(10, 2)], &[]).unwrap();
        assert!(rich_eq(&from_ratio, &x).unwrap());
        assert!(rich_eq(&from_ratio, &HostValue::ratio(5, 1)).unwrap());
        assert!(rich_eq(&HostValue::ratio(15, 3), &x).unwrap());
        assert!(!rich_eq(&x, &HostValue::ratio(11, 2)).unwrap());
        assert_eq!(hash(&HostValue::ratio(5, 1)).unwrap(), hash(&x).unwrap());
        assert_eq!(hash(&from_ratio).unwrap(), hash(&HostValue::int(5)).unwrap());
        assert_eq!(
            hash(&HostValue::ratio(1, 2)),
            Err(Error::Unhashable { type_name: "Fraction" })
        );
        assert!(rich_eq(&HostValue::int(1), &HostValue::int(1)).is_err());

        assert_eq!(hash(&x).unwrap(), hash(&element(&module, 5, 0)).unwrap());
        assert_eq!(hash(&x).unwrap(), hash(&HostValue::int(5)).unwrap());
        assert_ne!(hash(&x).unwrap(), hash(&y).unwrap());
        assert_eq!(
            hash(&HostValue::Float(1.0)),
            Err(Error::Unhashable { type_name: "float" })
        );
    }

    #[test]
    fn allocation_failure_test() {
        let alloc = Arc::new(LimitedAllocator::new(2));
        let mut module = Module::with_allocator("m", alloc.clone());
        module_exec(&mut module).unwrap();

        let x = element(&module, 1, 1);
        let y = element(&module, 2, 2);
        assert!(matches!(
            binary_op(BinaryOp::Mul, &x, &y),
            Err(Error::Allocation { type_name: "QuadraticElement2", .. })
        ));
        drop(y);
        assert!(binary_op(BinaryOp::Mul, &x, &x).is_ok());
        drop(x);
        assert_eq!(alloc.live(), 0);
    }
}
