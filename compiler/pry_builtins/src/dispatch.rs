//! Guarded entry points.
//!
//! `Builtins` is what the evaluator holds. Each operation runs under
//! `catch_unwind`, so a panic inside a builtin becomes
//! `InterpretErrorKind::Panicked` instead of unwinding into the host.
//!
//! Catching a panic does not silence it: the process-wide panic hook runs
//! before `catch_unwind` returns, and the default hook prints
//! `thread '..' panicked at ..` to stderr. A REPL that wants the
//! `Panicked` error to be the only report installs its own hook with
//! `std::panic::set_hook` at startup.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use pry_value::{DynType, Value};

use crate::builtin::Builtin;
use crate::errors::{
    arity_mismatch, missing_type_argument, panicked, unexpected_type_argument, DynResult,
    InterpretError,
};
use crate::limits::Limits;
use crate::{append, close, len, make};

/// The builtin layer, configured with allocation limits.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Builtins {
    limits: Limits,
}

impl Builtins {
    /// Builtins with the default limits.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limits(limits: Limits) -> Self {
        Builtins { limits }
    }

    #[inline]
    pub fn limits(&self) -> &Limits {
        &self.limits
    }

    /// `append(slice, elems...)`: a new slice holding `slice`'s items then `elems`.
    ///
    /// `slice` is left untouched. A nil slice appends like an empty one.
    pub fn append(&self, slice: &Value, elems: &[Value]) -> DynResult {
        guarded(Builtin::Append, || append::append(&self.limits, slice, elems))
    }

    /// `make(ty, args...)` for slice and channel types.
    pub fn make(&self, ty: &DynType, args: &[Value]) -> DynResult {
        guarded(Builtin::Make, || make::make(&self.limits, ty, args))
    }

    /// `close(ch)`.
    pub fn close(&self, channel: &Value) -> Result<(), InterpretError> {
        guarded(Builtin::Close, || close::close(channel))
    }

    /// `len(v)` as an int value.
    pub fn len(&self, value: &Value) -> DynResult {
        guarded(Builtin::Len, || len::len(value))
    }

    /// `cap(v)` as an int value.
    pub fn cap(&self, value: &Value) -> DynResult {
        guarded(Builtin::Cap, || len::cap(value))
    }

    /// Route a call by selector.
    ///
    /// `ty` is the type argument and is required for `make` only. Returns
    /// `Ok(None)` for builtins without a result (`close`).
    #[tracing::instrument(level = "debug", skip_all, fields(builtin = %builtin, args = args.len()))]
    pub fn call(
        &self,
        builtin: Builtin,
        ty: Option<&DynType>,
        args: &[Value],
    ) -> Result<Option<Value>, InterpretError> {
        match (builtin.takes_type(), ty) {
            (true, None) => return Err(missing_type_argument(builtin)),
            (false, Some(_)) => return Err(unexpected_type_argument(builtin)),
            _ => {}
        }
        let arity = builtin.arity();
        if !arity.accepts(args.len()) {
            return Err(arity_mismatch(builtin, arity, args.len()));
        }

        match (builtin, ty, args) {
            (Builtin::Append, _, [slice, elems @ ..]) => self.append(slice, elems).map(Some),
            (Builtin::Make, Some(ty), _) => self.make(ty, args).map(Some),
            (Builtin::Close, _, [channel]) => self.close(channel).map(|()| None),
            (Builtin::Len, _, [value]) => self.len(value).map(Some),
            (Builtin::Cap, _, [value]) => self.cap(value).map(Some),
            // Shapes above are exhaustive once the checks have passed.
            _ => Err(arity_mismatch(builtin, arity, args.len())),
        }
    }
}

/// Run `op`, turning a panic into `Panicked` and logging any failure.
///
/// The panic hook has already run by the time the payload reaches here.
fn guarded<T>(
    builtin: Builtin,
    op: impl FnOnce() -> Result<T, InterpretError>,
) -> Result<T, InterpretError> {
    let result = match panic::catch_unwind(AssertUnwindSafe(op)) {
        Ok(result) => result,
        Err(payload) => {
            let message = panic_message(&*payload);
            tracing::error!(%builtin, %message, "builtin panicked");
            Err(panicked(builtin, message))
        }
    };
    match &result {
        Ok(_) => tracing::trace!(%builtin, "builtin succeeded"),
        Err(err) => tracing::debug!(%builtin, category = ?err.category(), %err, "builtin failed"),
    }
    result
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else {
        "non-string panic payload".to_string()
    }
}

#[cfg(test)]
mod tests;
