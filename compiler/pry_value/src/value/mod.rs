//! Runtime values for the pry evaluator.
//!
//! Every `Value` carries enough type information to answer "what is your
//! exact type?" without outside help: scalars are tagged by their variant,
//! slices and maps store their declared element types, channels store
//! their element type, and typed nils store the whole descriptor.
//!
//! Heap payloads go through `Heap<T>`, whose constructor is private to
//! this crate; the factory methods below are the only way to build them.
//!
//! ```text
//! let s = Value::string("hello");
//! let xs = Value::slice(DynType::Int, vec![Value::Int(1)]);
//! let ch = Value::channel(DynType::Int, 4);
//! ```

mod channel;
mod composite;

use std::fmt;
use std::hash::{Hash, Hasher};

use rustc_hash::FxHashMap;

use crate::heap::Heap;
use crate::ty::{DynType, Kind};

pub use channel::{ChannelError, ChannelValue, TryRecvError};
pub use composite::{MapValue, SliceValue};

/// A dynamically typed runtime value.
#[derive(Clone)]
pub enum Value {
    // Scalars (inline)
    Int(i64),
    Float(f64),
    Bool(bool),
    Char(char),
    Byte(u8),

    // Heap types
    Str(Heap<String>),
    Slice(SliceValue),
    Map(MapValue),
    Chan(ChannelValue),

    /// Zero value of a slice, map or channel type.
    ///
    /// A `Nil` of any other kind has no valid type: it matches no type in
    /// `is_of_type` and has neither length nor capacity.
    Nil(DynType),
}

// Factory Methods

impl Value {
    #[inline]
    pub fn string(s: impl Into<String>) -> Self {
        Value::Str(Heap::new(s.into()))
    }

    /// Slice of `elem` whose capacity equals its length.
    #[inline]
    pub fn slice(elem: DynType, items: Vec<Value>) -> Self {
        let cap = items.len();
        Value::Slice(SliceValue::new(elem, items, cap))
    }

    /// Slice of `elem` with an explicit capacity.
    ///
    /// A capacity smaller than `items.len()` is raised to the length.
    #[inline]
    pub fn slice_with_capacity(elem: DynType, items: Vec<Value>, cap: usize) -> Self {
        Value::Slice(SliceValue::new(elem, items, cap))
    }

    #[inline]
    pub fn map(key: DynType, value: DynType, entries: FxHashMap<Value, Value>) -> Self {
        Value::Map(MapValue::new(key, value, entries))
    }

    /// New open channel of `elem`; `capacity == 0` is unbuffered.
    #[inline]
    pub fn channel(elem: DynType, capacity: usize) -> Self {
        Value::Chan(ChannelValue::new(elem, capacity))
    }
}

// Introspection

impl Value {
    /// The exact dynamic type of this value.
    pub fn type_of(&self) -> DynType {
        match self {
            Value::Int(_) => DynType::Int,
            Value::Float(_) => DynType::Float,
            Value::Bool(_) => DynType::Bool,
            Value::Char(_) => DynType::Char,
            Value::Byte(_) => DynType::Byte,
            Value::Str(_) => DynType::Str,
            Value::Slice(s) => s.slice_type(),
            Value::Map(m) => m.map_type(),
            Value::Chan(c) => c.chan_type(),
            Value::Nil(ty) => ty.clone(),
        }
    }

    /// Whether `type_of() == *ty`, without building a descriptor.
    pub fn is_of_type(&self, ty: &DynType) -> bool {
        match (self, ty) {
            (Value::Int(_), DynType::Int)
            | (Value::Float(_), DynType::Float)
            | (Value::Bool(_), DynType::Bool)
            | (Value::Char(_), DynType::Char)
            | (Value::Byte(_), DynType::Byte)
            | (Value::Str(_), DynType::Str) => true,
            (Value::Slice(s), DynType::Slice(elem)) => s.elem_type() == &**elem,
            (Value::Map(m), DynType::Map { key, value }) => {
                m.key_type() == &**key && m.value_type() == &**value
            }
            (Value::Chan(c), DynType::Chan(elem)) => c.elem_type() == &**elem,
            (Value::Nil(own), _) => own.kind().is_nilable() && own == ty,
            _ => false,
        }
    }

    #[inline]
    pub fn kind(&self) -> Kind {
        match self {
            Value::Int(_) => Kind::Int,
            Value::Float(_) => Kind::Float,
            Value::Bool(_) => Kind::Bool,
            Value::Char(_) => Kind::Char,
            Value::Byte(_) => Kind::Byte,
            Value::Str(_) => Kind::Str,
            Value::Slice(_) => Kind::Slice,
            Value::Map(_) => Kind::Map,
            Value::Chan(_) => Kind::Chan,
            Value::Nil(ty) => ty.kind(),
        }
    }

    /// Length for kinds that have one.
    ///
    /// Strings report their UTF-8 byte length, channels their buffered
    /// item count, typed nils of slice, map and channel types zero.
    /// Scalars return `None`.
    pub fn len(&self) -> Option<usize> {
        match self {
            Value::Str(s) => Some(s.len()),
            Value::Slice(s) => Some(s.len()),
            Value::Map(m) => Some(m.len()),
            Value::Chan(c) => Some(c.len()),
            Value::Nil(ty) if ty.kind().is_nilable() => Some(0),
            Value::Int(_)
            | Value::Float(_)
            | Value::Bool(_)
            | Value::Char(_)
            | Value::Byte(_)
            | Value::Nil(_) => None,
        }
    }

    /// Capacity for slices and channels (typed nils included).
    pub fn cap(&self) -> Option<usize> {
        match self {
            Value::Slice(s) => Some(s.cap()),
            Value::Chan(c) => Some(c.capacity()),
            Value::Nil(ty) if matches!(ty.kind(), Kind::Slice | Kind::Chan) => Some(0),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_slice(&self) -> Option<&SliceValue> {
        match self {
            Value::Slice(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_channel(&self) -> Option<&ChannelValue> {
        match self {
            Value::Chan(c) => Some(c),
            _ => None,
        }
    }
}

// Trait Implementations

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(n) => write!(f, "Int({n})"),
            Value::Float(n) => write!(f, "Float({n})"),
            Value::Bool(b) => write!(f, "Bool({b})"),
            Value::Char(c) => write!(f, "Char({c:?})"),
            Value::Byte(b) => write!(f, "Byte({b})"),
            Value::Str(s) => write!(f, "Str({:?})", &***s),
            Value::Slice(s) => write!(
                f,
                "Slice({}, cap {}, {:?})",
                s.slice_type(),
                s.cap(),
                s.items()
            ),
            Value::Map(m) => write!(f, "Map({}, {} entries)", m.map_type(), m.len()),
            Value::Chan(c) => write!(f, "{c:?}"),
            Value::Nil(ty) => write!(f, "Nil({ty})"),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(n) => write!(f, "{n}"),
            Value::Float(n) => write!(f, "{n}"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Char(c) => write!(f, "'{c}'"),
            Value::Byte(b) => write!(f, "0x{b:02x}"),
            Value::Str(s) => write!(f, "\"{}\"", &***s),
            Value::Slice(s) => {
                write!(f, "[")?;
                for (i, item) in s.items().iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
            Value::Map(m) => write!(f, "<{} len {}>", m.map_type(), m.len()),
            Value::Chan(c) => write!(f, "<{}>", c.chan_type()),
            Value::Nil(ty) => write!(f, "<nil {ty}>"),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Int(a), Value::Int(b)) => a == b,
            // Bitwise, so that Eq and Hash agree
            (Value::Float(a), Value::Float(b)) => a.to_bits() == b.to_bits(),
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Char(a), Value::Char(b)) => a == b,
            (Value::Byte(a), Value::Byte(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Slice(a), Value::Slice(b)) => a == b,
            (Value::Map(a), Value::Map(b)) => a == b,
            (Value::Chan(a), Value::Chan(b)) => a == b,
            (Value::Nil(a), Value::Nil(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Value {}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Value::Int(n) => n.hash(state),
            Value::Float(f) => f.to_bits().hash(state),
            Value::Bool(b) => b.hash(state),
            Value::Char(c) => c.hash(state),
            Value::Byte(b) => b.hash(state),
            Value::Str(s) => s.hash(state),
            Value::Slice(s) => s.hash(state),
            Value::Map(m) => m.hash(state),
            Value::Chan(c) => c.hash(state),
            Value::Nil(ty) => ty.hash(state),
        }
    }
}
