//! `len(v)` and `cap(v)`.

use pry_value::Value;

use crate::errors::{no_capacity, no_length, DynResult};

/// Element count of a slice, map, or channel buffer, or byte length of a string.
///
/// Typed nils have length 0. Scalars have no length.
pub(crate) fn len(value: &Value) -> DynResult {
    value
        .len()
        .map(int_value)
        .ok_or_else(|| no_length(value.type_of()))
}

/// Capacity of a slice or channel. Typed nil slices and channels report 0.
pub(crate) fn cap(value: &Value) -> DynResult {
    value
        .cap()
        .map(int_value)
        .ok_or_else(|| no_capacity(value.type_of()))
}

fn int_value(n: usize) -> Value {
    Value::Int(i64::try_from(n).unwrap_or(i64::MAX))
}

#[cfg(test)]
mod tests;
