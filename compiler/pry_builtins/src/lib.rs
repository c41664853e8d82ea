#![deny(clippy::arithmetic_side_effects)]
//! Pry Builtins - the dynamic builtin layer of the pry evaluator.
//!
//! The evaluator parses `append(s, 1)` or `make([]int, n)` and hands the
//! resolved call here with the arguments already evaluated to `Value`s.
//! This crate provides:
//! - `Builtin`: the selector, parsed from the builtin's source name
//! - `Builtins`: the guarded operations `append`, `make`, `close`, `len`, `cap`
//! - `InterpretError`: the classified failure every operation reports
//! - `Limits`: allocation bounds for `make` and `append`
//!
//! # Panic Freedom
//!
//! Invalid operations that would abort a native runtime (closing a closed
//! channel, `len` of an int, a negative size) are reported as errors. Any
//! panic that still escapes an operation is caught at the `Builtins`
//! boundary and returned as `InterpretErrorKind::Panicked`. The panic hook
//! still runs first; hosts that do not want its stderr output replace it
//! with `std::panic::set_hook`.
//!
//! # Example
//!
//! ```
//! use pry_builtins::{Builtin, Builtins};
//! use pry_value::{DynType, Value};
//!
//! let builtins = Builtins::new();
//! let s = Value::slice(DynType::Int, vec![Value::Int(1), Value::Int(2)]);
//! let grown = builtins.append(&s, &[Value::Int(3)]);
//! assert_eq!(grown.ok().and_then(|v| v.len()), Some(3));
//!
//! let err = builtins.call(Builtin::Append, None, &[s, Value::string("x")]);
//! assert_eq!(err.err().map(|e| e.to_string()).as_deref(), Some("str cannot append to []int"));
//! ```

mod append;
mod builtin;
mod close;
mod dispatch;
mod errors;
mod len;
mod limits;
mod make;
mod tracing_setup;

pub use builtin::{Builtin, UnknownBuiltin};
pub use dispatch::Builtins;
pub use errors::{Arity, DynResult, ErrorCategory, InterpretError, InterpretErrorKind, SizeParam};
pub use limits::{Limits, DEFAULT_MAX_CHAN_BUFFER, DEFAULT_MAX_LEN};
pub use tracing_setup::init_tracing;
