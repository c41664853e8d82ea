//! Slice and map payloads.

use std::hash::{Hash, Hasher};

use rustc_hash::FxHashMap;

use crate::heap::Heap;
use crate::ty::DynType;

use super::Value;

/// A growable sequence with a declared element type.
///
/// Items are shared between clones; producing a longer slice always builds
/// a new item vector, so holders of the old value never observe the change.
///
/// # Invariant
///
/// `len() <= cap()`.
#[derive(Clone)]
pub struct SliceValue {
    elem: DynType,
    items: Heap<Vec<Value>>,
    cap: usize,
}

impl SliceValue {
    /// Build a slice. A capacity below the item count is raised to it.
    pub(super) fn new(elem: DynType, items: Vec<Value>, cap: usize) -> Self {
        let cap = cap.max(items.len());
        SliceValue {
            elem,
            items: Heap::new(items),
            cap,
        }
    }

    /// Declared element type.
    #[inline]
    pub fn elem_type(&self) -> &DynType {
        &self.elem
    }

    #[inline]
    pub fn items(&self) -> &[Value] {
        &self.items
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[inline]
    pub fn cap(&self) -> usize {
        self.cap
    }

    /// The `[]elem` descriptor of this slice.
    pub fn slice_type(&self) -> DynType {
        DynType::slice_of(self.elem.clone())
    }

    /// Whether `other` shares this slice's item storage.
    pub fn shares_storage(&self, other: &SliceValue) -> bool {
        Heap::ptr_eq(&self.items, &other.items)
    }
}

// Capacity is not part of a slice's contents.
impl PartialEq for SliceValue {
    fn eq(&self, other: &Self) -> bool {
        self.elem == other.elem && self.items == other.items
    }
}

impl Hash for SliceValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.elem.hash(state);
        for item in self.items.iter() {
            item.hash(state);
        }
    }
}

/// A mapping with declared key and value types.
#[derive(Clone, PartialEq)]
pub struct MapValue {
    key: DynType,
    value: DynType,
    entries: Heap<FxHashMap<Value, Value>>,
}

impl MapValue {
    pub(super) fn new(key: DynType, value: DynType, entries: FxHashMap<Value, Value>) -> Self {
        MapValue {
            key,
            value,
            entries: Heap::new(entries),
        }
    }

    #[inline]
    pub fn key_type(&self) -> &DynType {
        &self.key
    }

    #[inline]
    pub fn value_type(&self) -> &DynType {
        &self.value
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The `map[key]value` descriptor of this map.
    pub fn map_type(&self) -> DynType {
        DynType::map_of(self.key.clone(), self.value.clone())
    }
}

impl Hash for MapValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // Entry order is unspecified; hash only order-independent parts.
        self.key.hash(state);
        self.value.hash(state);
        self.entries.len().hash(state);
    }
}
