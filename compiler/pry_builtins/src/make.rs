//! `make(T, args...)`.
//!
//! Construction dispatches on the kind of `T`:
//!
//! | Kind  | Arguments          | Result                                   |
//! |-------|--------------------|------------------------------------------|
//! | slice | `len [, cap]`      | `len` zero values, capacity `cap` or `len` |
//! | chan  | `[size]`           | open channel buffering `size` (default 0) |
//! | other | -                  | `UnsupportedKind`                        |
//!
//! Every size argument must be a non-negative int. Nothing is allocated
//! until all arguments have been validated.

use pry_value::{DynType, Value};

use crate::errors::{
    allocation_failed, len_exceeds_cap, make_arity_mismatch, negative_argument, not_an_int,
    unsupported_kind, Arity, DynResult, InterpretError, SizeParam,
};
use crate::limits::Limits;

pub(crate) fn make(limits: &Limits, ty: &DynType, args: &[Value]) -> DynResult {
    match ty {
        DynType::Slice(elem) => make_slice(limits, ty, elem, args),
        DynType::Chan(elem) => make_chan(limits, ty, elem, args),
        _ => Err(unsupported_kind(ty)),
    }
}

fn make_slice(limits: &Limits, ty: &DynType, elem: &DynType, args: &[Value]) -> DynResult {
    let (len_arg, cap_arg) = match args {
        [len] => (len, None),
        [len, cap] => (len, Some(cap)),
        _ => return Err(make_arity_mismatch(ty, Arity::Between(1, 2), args.len())),
    };
    let len = size_arg(len_arg, SizeParam::Len)?;
    let cap = match cap_arg {
        Some(arg) => size_arg(arg, SizeParam::Cap)?,
        None => len,
    };
    if len > cap {
        return Err(len_exceeds_cap(len, cap));
    }
    limits.check_len(SizeParam::Len, len)?;
    limits.check_len(SizeParam::Cap, cap)?;

    let mut items = Vec::new();
    items
        .try_reserve_exact(len)
        .map_err(|_| allocation_failed(len))?;
    items.resize(len, elem.zero_value());
    tracing::trace!(%ty, len, cap, "made slice");
    Ok(Value::slice_with_capacity(elem.clone(), items, cap))
}

fn make_chan(limits: &Limits, ty: &DynType, elem: &DynType, args: &[Value]) -> DynResult {
    let size = match args {
        [] => 0,
        [size] => size_arg(size, SizeParam::Size)?,
        _ => return Err(make_arity_mismatch(ty, Arity::AtMost(1), args.len())),
    };
    limits.check_chan_buffer(size)?;
    tracing::trace!(%ty, size, "made channel");
    Ok(Value::channel(elem.clone(), size))
}

/// Read a size argument: an int that is not negative.
///
/// Values beyond `usize` saturate and are rejected later by the limits.
fn size_arg(arg: &Value, param: SizeParam) -> Result<usize, InterpretError> {
    let Some(n) = arg.as_int() else {
        return Err(not_an_int(param, arg.type_of()));
    };
    if n < 0 {
        return Err(negative_argument(param, n));
    }
    Ok(usize::try_from(n).unwrap_or(usize::MAX))
}
