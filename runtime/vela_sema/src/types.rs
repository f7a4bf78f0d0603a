//! Static types, the type registry, and member descriptors.
//!
//! Composite and interface types live in a registry arena addressed by
//! [`TypeId`]; the `Type` enum holds ids rather than owning entries, so a
//! container back-reference is a plain non-owning id.

use std::collections::BTreeMap;

use vela_ir::{ast::Access, ast::CompositeKind, ast::DeclarationKind, ast::VariableKind, Name, Span};

/// Handle into the [`TypeRegistry`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct TypeId(u32);

impl TypeId {
    /// Raw index.
    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

/// Fixed-width and arbitrary-precision integer kinds.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum IntegerKind {
    /// Arbitrary precision, signed.
    Int,
    Int8,
    Int16,
    Int32,
    Int64,
    Int128,
    Int256,
    /// Arbitrary precision, unsigned.
    UInt,
    UInt8,
    UInt16,
    UInt32,
    UInt64,
    UInt128,
    UInt256,
    Word8,
    Word16,
    Word32,
    Word64,
}

/// Fixed-point decimal kinds (scaled by 1e8).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum FixedPointKind {
    Fix64,
    UFix64,
}

/// A resolved static type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Type {
    Void,
    Bool,
    String,
    Address,
    Integer(IntegerKind),
    FixedPoint(FixedPointKind),
    Array(Box<Type>),
    Dictionary {
        key: Box<Type>,
        value: Box<Type>,
    },
    Optional(Box<Type>),
    Reference {
        authorized: bool,
        referenced: Box<Type>,
    },
    Composite(TypeId),
    Interface(TypeId),
    Function {
        parameters: Vec<Type>,
        return_type: Box<Type>,
    },
    /// Error-recovery type: resolution failed and was already reported.
    Invalid,
}

impl Type {
    /// Resolve a builtin type name. Builtins shadow nothing and cannot be
    /// shadowed; they are checked before the scope stack.
    pub fn builtin(name: &str) -> Option<Type> {
        use FixedPointKind::{Fix64, UFix64};
        use IntegerKind::{
            Int, Int128, Int16, Int256, Int32, Int64, Int8, UInt, UInt128, UInt16, UInt256,
            UInt32, UInt64, UInt8, Word16, Word32, Word64, Word8,
        };
        let ty = match name {
            "Void" => Type::Void,
            "Bool" => Type::Bool,
            "String" => Type::String,
            "Address" => Type::Address,
            "Int" => Type::Integer(Int),
            "Int8" => Type::Integer(Int8),
            "Int16" => Type::Integer(Int16),
            "Int32" => Type::Integer(Int32),
            "Int64" => Type::Integer(Int64),
            "Int128" => Type::Integer(Int128),
            "Int256" => Type::Integer(Int256),
            "UInt" => Type::Integer(UInt),
            "UInt8" => Type::Integer(UInt8),
            "UInt16" => Type::Integer(UInt16),
            "UInt32" => Type::Integer(UInt32),
            "UInt64" => Type::Integer(UInt64),
            "UInt128" => Type::Integer(UInt128),
            "UInt256" => Type::Integer(UInt256),
            "Word8" => Type::Integer(Word8),
            "Word16" => Type::Integer(Word16),
            "Word32" => Type::Integer(Word32),
            "Word64" => Type::Integer(Word64),
            "Fix64" => Type::FixedPoint(Fix64),
            "UFix64" => Type::FixedPoint(UFix64),
            _ => return None,
        };
        Some(ty)
    }

    #[inline]
    pub const fn is_invalid(&self) -> bool {
        matches!(self, Type::Invalid)
    }

    /// Whether this type is itself a resource type. Plain containers
    /// (arrays, dictionaries, optionals) are never resource types; a
    /// resource inside one is caught by [`Type::contains_resource`].
    pub fn is_resource(&self, registry: &TypeRegistry) -> bool {
        match self {
            Type::Composite(id) | Type::Interface(id) => {
                registry.entry(*id).composite_kind.is_resource()
            }
            _ => false,
        }
    }

    /// Whether a resource type occurs anywhere inside this type's owning
    /// structure. References and function types do not own their referents
    /// and are not descended into.
    pub fn contains_resource(&self, registry: &TypeRegistry) -> bool {
        match self {
            Type::Composite(_) | Type::Interface(_) => self.is_resource(registry),
            Type::Array(element) => element.contains_resource(registry),
            Type::Dictionary { key, value } => {
                key.contains_resource(registry) || value.contains_resource(registry)
            }
            Type::Optional(inner) => inner.contains_resource(registry),
            _ => false,
        }
    }

    /// Whether any of the given registry entries occurs in this type's
    /// owning structure. Drives the illegal self-nesting check while a
    /// type's container-checking flag is set.
    pub fn contains_any_id(&self, ids: &rustc_hash::FxHashSet<TypeId>) -> bool {
        match self {
            Type::Composite(id) | Type::Interface(id) => ids.contains(id),
            Type::Array(element) => element.contains_any_id(ids),
            Type::Dictionary { key, value } => {
                key.contains_any_id(ids) || value.contains_any_id(ids)
            }
            Type::Optional(inner) => inner.contains_any_id(ids),
            _ => false,
        }
    }
}

/// A resolved type annotation: the resource-move marker plus the type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypeAnnotation {
    pub is_resource: bool,
    pub ty: Type,
}

/// A member of a composite or interface type: a field or a function, with
/// its resolved type, access, and origin.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Member {
    pub identifier: Name,
    pub access: Access,
    /// `Field` or `Function`.
    pub declaration_kind: DeclarationKind,
    /// `Constant` for functions.
    pub variable_kind: VariableKind,
    pub type_annotation: TypeAnnotation,
    /// Where the member was declared, for "declared at" reporting.
    pub declared_at: Span,
}

/// A registry entry for a composite or interface type.
///
/// Created as a near-empty placeholder in the declare phase so that
/// self-referencing annotations resolve; members, nested types, and
/// initializer signatures are populated in the check phase and the entry is
/// treated as immutable afterwards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypeEntry {
    pub identifier: Name,
    pub composite_kind: CompositeKind,
    pub is_interface: bool,
    /// Nested types by name, in deterministic order.
    pub nested_types: BTreeMap<Name, Type>,
    /// Members (fields and functions) by name, in deterministic order.
    pub members: BTreeMap<Name, Member>,
    /// Initializer parameter type annotations, in parameter order.
    pub initializer_parameter_types: Vec<TypeAnnotation>,
    /// Enclosing type, for scope resolution only.
    pub container: Option<TypeId>,
    /// Backing integer type for registered builtin enums.
    pub enum_raw_type: Option<Type>,
    /// Case names for registered builtin enums, in ordinal order.
    pub enum_cases: Vec<Name>,
    pub span: Span,
}

impl TypeEntry {
    fn placeholder(identifier: Name, composite_kind: CompositeKind, is_interface: bool, span: Span) -> Self {
        TypeEntry {
            identifier,
            composite_kind,
            is_interface,
            nested_types: BTreeMap::new(),
            members: BTreeMap::new(),
            initializer_parameter_types: Vec::new(),
            container: None,
            enum_raw_type: None,
            enum_cases: Vec::new(),
            span,
        }
    }
}

/// Arena of composite and interface type entries.
#[derive(Clone, Debug, Default)]
pub struct TypeRegistry {
    entries: Vec<TypeEntry>,
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of registered entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Allocate an interface placeholder.
    pub fn alloc_interface(
        &mut self,
        identifier: Name,
        composite_kind: CompositeKind,
        span: Span,
    ) -> TypeId {
        self.alloc(TypeEntry::placeholder(identifier, composite_kind, true, span))
    }

    /// Allocate a concrete composite placeholder.
    pub fn alloc_composite(
        &mut self,
        identifier: Name,
        composite_kind: CompositeKind,
        span: Span,
    ) -> TypeId {
        self.alloc(TypeEntry::placeholder(identifier, composite_kind, false, span))
    }

    fn alloc(&mut self, entry: TypeEntry) -> TypeId {
        let raw = u32::try_from(self.entries.len())
            .unwrap_or_else(|_| crate::fault::internal("type registry exceeded u32 capacity"));
        self.entries.push(entry);
        TypeId(raw)
    }

    /// Borrow an entry.
    pub fn entry(&self, id: TypeId) -> &TypeEntry {
        self.entries
            .get(id.0 as usize)
            .unwrap_or_else(|| crate::fault::internal("dangling type id"))
    }

    /// Borrow an entry mutably. Only the check phase for the entry's own
    /// declaration may do this.
    pub fn entry_mut(&mut self, id: TypeId) -> &mut TypeEntry {
        self.entries
            .get_mut(id.0 as usize)
            .unwrap_or_else(|| crate::fault::internal("dangling type id"))
    }
}
