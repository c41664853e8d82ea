//! `append(slice, elems...)`.

use pry_value::{DynType, Value};

use crate::builtin::Builtin;
use crate::errors::{
    allocation_failed, allocation_limit, append_type_mismatch, not_a_slice, DynResult, SizeParam,
};
use crate::limits::Limits;

/// Capacity at which growth switches from doubling to ~1.25x.
const GROWTH_THRESHOLD: usize = 256;

/// Constant term of large-slice growth, `(cap + 768) / 4` per step.
const GROWTH_BIAS: usize = 3 * GROWTH_THRESHOLD;

/// Append `elems` to `slice`, returning a new slice.
///
/// Every element must have exactly the slice's element type; the first one
/// that does not fails the whole call. The input slice is never modified.
pub(crate) fn append(limits: &Limits, slice: &Value, elems: &[Value]) -> DynResult {
    let (elem_ty, items, cap): (&DynType, &[Value], usize) = match slice {
        Value::Slice(s) => (s.elem_type(), s.items(), s.cap()),
        Value::Nil(DynType::Slice(elem)) => (&**elem, <&[Value]>::default(), 0),
        other => return Err(not_a_slice(Builtin::Append, other.type_of())),
    };

    if let Some(bad) = elems.iter().find(|elem| !elem.is_of_type(elem_ty)) {
        return Err(append_type_mismatch(bad.type_of(), slice.type_of()));
    }
    if elems.is_empty() {
        return Ok(slice.clone());
    }

    let needed = items
        .len()
        .checked_add(elems.len())
        .ok_or_else(|| allocation_limit(SizeParam::Len, usize::MAX, limits.max_len()))?;
    limits.check_len(SizeParam::Len, needed)?;
    // The limit caps growth; it never lowers an existing capacity.
    let new_cap = grow_capacity(cap, needed).min(limits.max_len().max(cap));

    let mut grown = Vec::new();
    grown
        .try_reserve_exact(needed)
        .map_err(|_| allocation_failed(needed))?;
    grown.extend_from_slice(items);
    grown.extend_from_slice(elems);
    Ok(Value::slice_with_capacity(elem_ty.clone(), grown, new_cap))
}

/// Capacity of a slice grown from `old_cap` to hold `needed` items.
///
/// Unchanged when the items fit. Otherwise small slices double, large ones
/// grow by a quarter plus 192 until they fit, and a jump past twice the old
/// capacity goes straight to `needed`.
fn grow_capacity(old_cap: usize, needed: usize) -> usize {
    if needed <= old_cap {
        return old_cap;
    }
    let doubled = old_cap.saturating_mul(2);
    if needed > doubled {
        return needed;
    }
    if old_cap < GROWTH_THRESHOLD {
        return doubled;
    }
    let mut cap = old_cap;
    while cap < needed {
        cap = cap.saturating_add(cap.saturating_add(GROWTH_BIAS) / 4);
    }
    cap
}
