//! Dynamic type descriptors.
//!
//! A `DynType` describes a type independently of any value. The evaluator
//! builds one when user code names a type (for example the first argument
//! of `make`), and every `Value` can report the exact `DynType` it carries.
//!
//! `Kind` is the structural category of a type, used for dispatch:
//! "is this a slice?" is a kind question, "is this a slice of int?" is a
//! type question.

use std::fmt;

use crate::heap::Heap;
use crate::value::Value;

/// Structural category of a dynamic type.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[repr(u8)]
pub enum Kind {
    // === Scalars ===
    /// 64-bit signed integer.
    Int = 0,
    /// 64-bit floating point.
    Float = 1,
    /// Boolean.
    Bool = 2,
    /// UTF-8 string.
    Str = 3,
    /// Unicode scalar value.
    Char = 4,
    /// 8-bit unsigned integer.
    Byte = 5,

    // === Containers ===
    /// Growable sequence `[]T`.
    Slice = 16,
    /// Channel `chan T`.
    Chan = 17,
    /// Mapping `map[K]V`.
    Map = 32,
}

impl Kind {
    /// Lowercase name used in diagnostics.
    pub fn name(self) -> &'static str {
        match self {
            Kind::Int => "int",
            Kind::Float => "float",
            Kind::Bool => "bool",
            Kind::Str => "str",
            Kind::Char => "char",
            Kind::Byte => "byte",
            Kind::Slice => "slice",
            Kind::Chan => "chan",
            Kind::Map => "map",
        }
    }

    /// Whether values of this kind have a typed nil as their zero value.
    #[inline]
    pub fn is_nilable(self) -> bool {
        matches!(self, Kind::Slice | Kind::Chan | Kind::Map)
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Runtime description of a type.
///
/// Equality is structural: `[]int == []int` regardless of where either
/// descriptor was built.
#[derive(Clone, PartialEq, Eq, Hash)]
pub enum DynType {
    Int,
    Float,
    Bool,
    Str,
    Char,
    Byte,
    /// `[]elem`
    Slice(Heap<DynType>),
    /// `map[key]value`
    Map {
        key: Heap<DynType>,
        value: Heap<DynType>,
    },
    /// `chan elem`
    Chan(Heap<DynType>),
}

impl DynType {
    /// `[]elem`
    #[inline]
    pub fn slice_of(elem: DynType) -> Self {
        DynType::Slice(Heap::new(elem))
    }

    /// `map[key]value`
    #[inline]
    pub fn map_of(key: DynType, value: DynType) -> Self {
        DynType::Map {
            key: Heap::new(key),
            value: Heap::new(value),
        }
    }

    /// `chan elem`
    #[inline]
    pub fn chan_of(elem: DynType) -> Self {
        DynType::Chan(Heap::new(elem))
    }

    pub fn kind(&self) -> Kind {
        match self {
            DynType::Int => Kind::Int,
            DynType::Float => Kind::Float,
            DynType::Bool => Kind::Bool,
            DynType::Str => Kind::Str,
            DynType::Char => Kind::Char,
            DynType::Byte => Kind::Byte,
            DynType::Slice(_) => Kind::Slice,
            DynType::Map { .. } => Kind::Map,
            DynType::Chan(_) => Kind::Chan,
        }
    }

    /// Element type of a slice or channel, value type of a map.
    pub fn elem(&self) -> Option<&DynType> {
        match self {
            DynType::Slice(elem) | DynType::Chan(elem) => Some(elem),
            DynType::Map { value, .. } => Some(value),
            _ => None,
        }
    }

    /// Key type of a map.
    pub fn key(&self) -> Option<&DynType> {
        match self {
            DynType::Map { key, .. } => Some(key),
            _ => None,
        }
    }

    /// The zero value of this type.
    ///
    /// Scalars zero to `0`, `0.0`, `false`, `""`, `'\0'`; slices, maps and
    /// channels zero to a typed nil.
    pub fn zero_value(&self) -> Value {
        match self {
            DynType::Int => Value::Int(0),
            DynType::Float => Value::Float(0.0),
            DynType::Bool => Value::Bool(false),
            DynType::Str => Value::string(""),
            DynType::Char => Value::Char('\0'),
            DynType::Byte => Value::Byte(0),
            DynType::Slice(_) | DynType::Map { .. } | DynType::Chan(_) => {
                Value::Nil(self.clone())
            }
        }
    }
}

impl fmt::Display for DynType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DynType::Slice(elem) => write!(f, "[]{elem}"),
            DynType::Map { key, value } => write!(f, "map[{key}]{value}"),
            DynType::Chan(elem) => write!(f, "chan {elem}"),
            scalar => f.write_str(scalar.kind().name()),
        }
    }
}

impl fmt::Debug for DynType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DynType({self})")
    }
}
