use super::*;
use crate::errors::{ErrorCategory, InterpretError, InterpretErrorKind};
use pry_value::{DynType, FxHashMap};
use pretty_assertions::assert_eq;

#[test]
fn len_of_slice() {
    let slice = Value::slice(DynType::Int, vec![Value::Int(1), Value::Int(2)]);
    assert_eq!(len(&slice), Ok(Value::Int(2)));
}

#[test]
fn len_of_string_counts_bytes() {
    assert_eq!(len(&Value::string("héllo")), Ok(Value::Int(6)));
    assert_eq!(len(&Value::string("")), Ok(Value::Int(0)));
}

#[test]
fn len_of_map() {
    let mut entries = FxHashMap::default();
    entries.insert(Value::string("a"), Value::Int(1));
    entries.insert(Value::string("b"), Value::Int(2));
    let map = Value::map(DynType::Str, DynType::Int, entries);
    assert_eq!(len(&map), Ok(Value::Int(2)));
}

#[test]
fn len_of_channel_counts_buffered_items() {
    let ch = Value::channel(DynType::Str, 3);
    assert_eq!(len(&ch), Ok(Value::Int(0)));
    let sent = ch
        .as_channel()
        .map(|c| c.try_send(Value::string("x")));
    assert_eq!(sent, Some(Ok(())));
    assert_eq!(len(&ch), Ok(Value::Int(1)));
}

#[test]
fn len_of_nil_is_zero() {
    assert_eq!(
        len(&Value::Nil(DynType::slice_of(DynType::Int))),
        Ok(Value::Int(0))
    );
    assert_eq!(
        len(&Value::Nil(DynType::map_of(DynType::Str, DynType::Bool))),
        Ok(Value::Int(0))
    );
}

#[test]
fn len_of_nil_scalar_fails() {
    assert_eq!(
        len(&Value::Nil(DynType::Int)).err().map(InterpretError::into_kind),
        Some(InterpretErrorKind::NoLength { got: DynType::Int })
    );
}

#[test]
fn len_of_scalar_fails() {
    let err = len(&Value::Int(5)).err();
    assert_eq!(
        err.as_ref().map(InterpretError::category),
        Some(ErrorCategory::InvalidOperation)
    );
    assert_eq!(
        err.map(|e| e.to_string()).as_deref(),
        Some("invalid argument: int has no length")
    );
}

#[test]
fn cap_of_slice_and_channel() {
    let slice = Value::slice_with_capacity(DynType::Int, vec![Value::Int(1)], 8);
    assert_eq!(cap(&slice), Ok(Value::Int(8)));
    assert_eq!(cap(&Value::channel(DynType::Int, 4)), Ok(Value::Int(4)));
    assert_eq!(cap(&Value::channel(DynType::Int, 0)), Ok(Value::Int(0)));
}

#[test]
fn cap_of_nil_slice_is_zero() {
    assert_eq!(
        cap(&Value::Nil(DynType::slice_of(DynType::Str))),
        Ok(Value::Int(0))
    );
}

#[test]
fn cap_of_string_fails() {
    assert_eq!(
        cap(&Value::string("abc")).err().map(InterpretError::into_kind),
        Some(InterpretErrorKind::NoCapacity { got: DynType::Str })
    );
}

#[test]
fn cap_of_map_fails() {
    let map = Value::map(DynType::Str, DynType::Int, FxHashMap::default());
    assert!(cap(&map).is_err());
}
