use super::*;
use crate::errors::{Arity, ErrorCategory, InterpretErrorKind};
use pretty_assertions::assert_eq;

fn ints(ns: &[i64]) -> Vec<Value> {
    ns.iter().copied().map(Value::Int).collect()
}

fn int_slice(ns: &[i64]) -> Value {
    Value::slice(DynType::Int, ints(ns))
}

fn kind_of<T>(result: Result<T, InterpretError>) -> Option<InterpretErrorKind> {
    result.err().map(InterpretError::into_kind)
}

// Routing

#[test]
fn call_append() {
    let b = Builtins::new();
    let args = [int_slice(&[1, 2]), Value::Int(3)];
    assert_eq!(
        b.call(Builtin::Append, None, &args),
        Ok(Some(int_slice(&[1, 2, 3])))
    );
}

#[test]
fn call_append_type_mismatch() {
    let b = Builtins::new();
    let args = [int_slice(&[1, 2]), Value::string("x")];
    let err = b.call(Builtin::Append, None, &args).err();
    assert_eq!(
        err.map(|e| e.category()),
        Some(ErrorCategory::TypeMismatch)
    );
}

#[test]
fn call_make_slice() {
    let b = Builtins::new();
    let ty = DynType::slice_of(DynType::Int);
    let made = b.call(Builtin::Make, Some(&ty), &ints(&[3, 5]));
    let made = made.ok().flatten();
    assert_eq!(made.as_ref().and_then(Value::len), Some(3));
    assert_eq!(made.as_ref().and_then(Value::cap), Some(5));
}

#[test]
fn call_make_chan_then_close_then_len() {
    let b = Builtins::new();
    let ty = DynType::chan_of(DynType::Int);
    let ch = b.call(Builtin::Make, Some(&ty), &[]).ok().flatten();
    let ch = ch.into_iter().collect::<Vec<_>>();
    assert_eq!(ch.len(), 1);

    assert_eq!(b.call(Builtin::Close, None, &ch), Ok(None));
    assert_eq!(b.call(Builtin::Len, None, &ch), Ok(Some(Value::Int(0))));
    assert_eq!(b.call(Builtin::Cap, None, &ch), Ok(Some(Value::Int(0))));
}

#[test]
fn call_len_of_string() {
    let b = Builtins::new();
    assert_eq!(
        b.call(Builtin::Len, None, &[Value::string("abc")]),
        Ok(Some(Value::Int(3)))
    );
}

// Call shape

#[test]
fn make_without_type_fails() {
    let b = Builtins::new();
    assert_eq!(
        kind_of(b.call(Builtin::Make, None, &ints(&[1]))),
        Some(InterpretErrorKind::MissingTypeArgument {
            builtin: Builtin::Make
        })
    );
}

#[test]
fn type_on_other_builtin_fails() {
    let b = Builtins::new();
    let ty = DynType::Int;
    let err = b.call(Builtin::Len, Some(&ty), &ints(&[1])).err();
    assert_eq!(
        err.map(|e| e.to_string()).as_deref(),
        Some("len does not take a type argument")
    );
}

#[test]
fn append_without_arguments_fails() {
    let b = Builtins::new();
    assert_eq!(
        kind_of(b.call(Builtin::Append, None, &[])),
        Some(InterpretErrorKind::ArityMismatch {
            builtin: Builtin::Append,
            expected: Arity::AtLeast(1),
            got: 0,
        })
    );
}

#[test]
fn single_argument_builtins_reject_two() {
    let b = Builtins::new();
    for builtin in [Builtin::Close, Builtin::Len, Builtin::Cap] {
        let err = b.call(builtin, None, &ints(&[1, 2])).err();
        assert_eq!(err.map(|e| e.category()), Some(ErrorCategory::Arity));
    }
    let err = b.call(Builtin::Len, None, &[]).err();
    assert_eq!(
        err.map(|e| e.to_string()).as_deref(),
        Some("len expects 1 argument, got 0")
    );
}

#[test]
fn make_with_too_many_arguments_fails() {
    let b = Builtins::new();
    let ty = DynType::slice_of(DynType::Int);
    let err = b.call(Builtin::Make, Some(&ty), &ints(&[1, 2, 3])).err();
    assert_eq!(err.map(|e| e.category()), Some(ErrorCategory::Arity));
}

// Former panic paths

#[test]
fn double_close_is_an_error() {
    let b = Builtins::new();
    let ch = Value::channel(DynType::Bool, 1);
    assert_eq!(b.close(&ch), Ok(()));
    assert_eq!(
        kind_of(b.close(&ch)),
        Some(InterpretErrorKind::CloseOfClosedChannel)
    );
}

#[test]
fn nil_close_and_scalar_len_are_errors() {
    let b = Builtins::new();
    let nil = Value::Nil(DynType::chan_of(DynType::Int));
    assert_eq!(
        b.close(&nil).err().map(|e| e.category()),
        Some(ErrorCategory::InvalidOperation)
    );
    assert_eq!(
        b.len(&Value::Int(4)).err().map(|e| e.category()),
        Some(ErrorCategory::InvalidOperation)
    );
}

// Guard

#[test]
fn panic_with_str_payload_is_caught() {
    let result: DynResult = guarded(Builtin::Append, || panic!("boom"));
    assert_eq!(
        kind_of(result),
        Some(InterpretErrorKind::Panicked {
            builtin: Builtin::Append,
            message: "boom".to_string(),
        })
    );
}

#[test]
fn panic_with_formatted_payload_is_caught() {
    let n = 7;
    let result: DynResult = guarded(Builtin::Make, || panic!("bad size {n}"));
    let err = result.err();
    assert_eq!(
        err.as_ref().map(|e| e.to_string()).as_deref(),
        Some("make panicked: bad size 7")
    );
    assert_eq!(err.map(|e| e.category()), Some(ErrorCategory::Internal));
}

#[test]
fn panic_with_other_payload_is_caught() {
    let result: DynResult = guarded(Builtin::Len, || std::panic::panic_any(42_u8));
    assert_eq!(
        kind_of(result),
        Some(InterpretErrorKind::Panicked {
            builtin: Builtin::Len,
            message: "non-string panic payload".to_string(),
        })
    );
}

#[test]
fn host_panic_hook_runs_before_the_error_is_returned() {
    use std::sync::atomic::{AtomicUsize, Ordering};

    static HOOK_CALLS: AtomicUsize = AtomicUsize::new(0);

    let previous = std::panic::take_hook();
    std::panic::set_hook(Box::new(|_| {
        HOOK_CALLS.fetch_add(1, Ordering::SeqCst);
    }));
    let result: DynResult = guarded(Builtin::Cap, || panic!("quiet"));
    std::panic::set_hook(previous);

    assert!(HOOK_CALLS.load(Ordering::SeqCst) >= 1);
    assert_eq!(
        result.err().map(|e| e.category()),
        Some(ErrorCategory::Internal)
    );
}

#[test]
fn guard_passes_results_through() {
    let ok: DynResult = guarded(Builtin::Len, || Ok(Value::Int(1)));
    assert_eq!(ok, Ok(Value::Int(1)));
}

// Configuration

#[test]
fn limits_apply_to_make_and_append() {
    let b = Builtins::with_limits(Limits::new().with_max_len(2).with_max_chan_buffer(1));
    assert_eq!(b.limits().max_len(), 2);

    let slice_ty = DynType::slice_of(DynType::Int);
    assert_eq!(
        b.make(&slice_ty, &ints(&[3])).err().map(|e| e.category()),
        Some(ErrorCategory::ResourceLimit)
    );
    assert_eq!(
        b.append(&int_slice(&[1, 2]), &ints(&[3]))
            .err()
            .map(|e| e.category()),
        Some(ErrorCategory::ResourceLimit)
    );
    let chan_ty = DynType::chan_of(DynType::Int);
    assert!(b.make(&chan_ty, &ints(&[1])).is_ok());
    assert!(b.make(&chan_ty, &ints(&[2])).is_err());
}

#[test]
fn builtins_are_shareable_across_threads() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Builtins>();
    assert_send_sync::<Value>();

    let b = Builtins::new();
    let ch = Value::channel(DynType::Int, 0);
    let results: Vec<_> = std::thread::scope(|s| {
        let handles: Vec<_> = (0..4).map(|_| s.spawn(|| b.close(&ch))).collect();
        handles.into_iter().map(|h| h.join().is_ok_and(|r| r.is_ok())).collect()
    });
    assert_eq!(results.iter().filter(|closed| **closed).count(), 1);
}
