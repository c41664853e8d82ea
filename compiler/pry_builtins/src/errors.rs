//! Interpreter-level errors.
//!
//! Everything this crate reports is an `InterpretError`. The type itself is
//! the classification: an evaluator holding one knows the failure came from
//! validating a builtin call, not from the user's program, and can render
//! it as a diagnostic on the offending expression.
//!
//! # Structured Error Categories
//!
//! `InterpretErrorKind` carries the structured data of each failure and its
//! message. `ErrorCategory` groups kinds into the coarse taxonomy callers
//! switch on. Factory functions below are the construction API used by the
//! builtin modules.

use std::fmt;

use pry_value::{DynType, Kind, Value};

use crate::builtin::Builtin;

/// Result of a builtin that produces a value.
pub type DynResult = Result<Value, InterpretError>;

/// Coarse classification of an interpreter-level failure.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// An operand's dynamic type does not fit the operation.
    TypeMismatch,
    /// Wrong number or shape of arguments.
    Arity,
    /// A size argument is not an int, is negative, or is inconsistent.
    InvalidArgument,
    /// `make` on a kind with no construction rule.
    UnsupportedKind,
    /// An operation the host runtime would abort on (double close, len of int).
    InvalidOperation,
    /// A requested allocation is above the configured limits or failed.
    ResourceLimit,
    /// A panic escaped a builtin and was caught.
    Internal,
}

/// Which size argument of `make` (or `append` growth) a failure refers to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum SizeParam {
    Len,
    Cap,
    /// Channel buffer size.
    Size,
}

impl fmt::Display for SizeParam {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SizeParam::Len => "len",
            SizeParam::Cap => "cap",
            SizeParam::Size => "size",
        })
    }
}

/// Accepted argument count of a builtin.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Arity {
    Exactly(usize),
    AtMost(usize),
    AtLeast(usize),
    Between(usize, usize),
}

impl Arity {
    pub fn accepts(self, count: usize) -> bool {
        match self {
            Arity::Exactly(n) => count == n,
            Arity::AtMost(n) => count <= n,
            Arity::AtLeast(n) => count >= n,
            Arity::Between(lo, hi) => (lo..=hi).contains(&count),
        }
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (prefix, n) = match *self {
            Arity::Exactly(n) => ("", n),
            Arity::AtMost(n) => ("at most ", n),
            Arity::AtLeast(n) => ("at least ", n),
            Arity::Between(lo, hi) => return write!(f, "{lo} to {hi} arguments"),
        };
        let word = if n == 1 { "argument" } else { "arguments" };
        write!(f, "{prefix}{n} {word}")
    }
}

/// Structured interpreter-level failure.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum InterpretErrorKind {
    // Type mismatch
    #[error("{elem} cannot append to {slice}")]
    AppendTypeMismatch { elem: DynType, slice: DynType },
    #[error("{builtin} requires a slice, got {got}")]
    NotASlice { builtin: Builtin, got: DynType },
    #[error("{builtin} requires a channel, got {got}")]
    NotAChannel { builtin: Builtin, got: DynType },

    // Arity
    #[error("{builtin} expects {expected}, got {got}")]
    ArityMismatch {
        builtin: Builtin,
        expected: Arity,
        got: usize,
    },
    #[error("make({ty}) expects {expected}, got {got}")]
    MakeArityMismatch {
        ty: DynType,
        expected: Arity,
        got: usize,
    },
    #[error("{builtin} requires a type argument")]
    MissingTypeArgument { builtin: Builtin },
    #[error("{builtin} does not take a type argument")]
    UnexpectedTypeArgument { builtin: Builtin },

    // Invalid numeric argument
    #[error("{param} is not int (got {got})")]
    NotAnInt { param: SizeParam, got: DynType },
    #[error("negative {param} argument {value}")]
    NegativeArgument { param: SizeParam, value: i64 },
    #[error("len larger than cap ({len} > {cap})")]
    LenExceedsCap { len: usize, cap: usize },

    // Unsupported kind
    #[error("cannot make {ty}: no construction rule for kind {kind}")]
    UnsupportedKind { ty: DynType, kind: Kind },

    // Invalid operation
    #[error("close of closed channel")]
    CloseOfClosedChannel,
    #[error("close of nil channel")]
    CloseOfNilChannel,
    #[error("invalid argument: {got} has no length")]
    NoLength { got: DynType },
    #[error("invalid argument: {got} has no capacity")]
    NoCapacity { got: DynType },

    // Resource limits
    #[error("{param} {requested} exceeds the limit of {limit}")]
    AllocationLimit {
        param: SizeParam,
        requested: usize,
        limit: usize,
    },
    #[error("cannot allocate {requested} elements")]
    AllocationFailed { requested: usize },

    // Internal
    #[error("{builtin} panicked: {message}")]
    Panicked { builtin: Builtin, message: String },
}

impl InterpretErrorKind {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::AppendTypeMismatch { .. } | Self::NotASlice { .. } | Self::NotAChannel { .. } => {
                ErrorCategory::TypeMismatch
            }
            Self::ArityMismatch { .. }
            | Self::MakeArityMismatch { .. }
            | Self::MissingTypeArgument { .. }
            | Self::UnexpectedTypeArgument { .. } => ErrorCategory::Arity,
            Self::NotAnInt { .. } | Self::NegativeArgument { .. } | Self::LenExceedsCap { .. } => {
                ErrorCategory::InvalidArgument
            }
            Self::UnsupportedKind { .. } => ErrorCategory::UnsupportedKind,
            Self::CloseOfClosedChannel
            | Self::CloseOfNilChannel
            | Self::NoLength { .. }
            | Self::NoCapacity { .. } => ErrorCategory::InvalidOperation,
            Self::AllocationLimit { .. } | Self::AllocationFailed { .. } => {
                ErrorCategory::ResourceLimit
            }
            Self::Panicked { .. } => ErrorCategory::Internal,
        }
    }
}

/// Error raised by the builtin layer itself, never by evaluated code.
///
/// Immutable once built; a returned error means no result was produced.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{kind}")]
pub struct InterpretError {
    kind: InterpretErrorKind,
}

impl InterpretError {
    #[inline]
    pub fn kind(&self) -> &InterpretErrorKind {
        &self.kind
    }

    #[inline]
    pub fn category(&self) -> ErrorCategory {
        self.kind.category()
    }

    pub fn into_kind(self) -> InterpretErrorKind {
        self.kind
    }
}

impl From<InterpretErrorKind> for InterpretError {
    fn from(kind: InterpretErrorKind) -> Self {
        InterpretError { kind }
    }
}

// Type Mismatch Errors

#[cold]
pub(crate) fn append_type_mismatch(elem: DynType, slice: DynType) -> InterpretError {
    InterpretErrorKind::AppendTypeMismatch { elem, slice }.into()
}

#[cold]
pub(crate) fn not_a_slice(builtin: Builtin, got: DynType) -> InterpretError {
    InterpretErrorKind::NotASlice { builtin, got }.into()
}

#[cold]
pub(crate) fn not_a_channel(builtin: Builtin, got: DynType) -> InterpretError {
    InterpretErrorKind::NotAChannel { builtin, got }.into()
}

// Arity Errors

#[cold]
pub(crate) fn arity_mismatch(builtin: Builtin, expected: Arity, got: usize) -> InterpretError {
    InterpretErrorKind::ArityMismatch {
        builtin,
        expected,
        got,
    }
    .into()
}

#[cold]
pub(crate) fn make_arity_mismatch(ty: &DynType, expected: Arity, got: usize) -> InterpretError {
    InterpretErrorKind::MakeArityMismatch {
        ty: ty.clone(),
        expected,
        got,
    }
    .into()
}

#[cold]
pub(crate) fn missing_type_argument(builtin: Builtin) -> InterpretError {
    InterpretErrorKind::MissingTypeArgument { builtin }.into()
}

#[cold]
pub(crate) fn unexpected_type_argument(builtin: Builtin) -> InterpretError {
    InterpretErrorKind::UnexpectedTypeArgument { builtin }.into()
}

// Numeric Argument Errors

#[cold]
pub(crate) fn not_an_int(param: SizeParam, got: DynType) -> InterpretError {
    InterpretErrorKind::NotAnInt { param, got }.into()
}

#[cold]
pub(crate) fn negative_argument(param: SizeParam, value: i64) -> InterpretError {
    InterpretErrorKind::NegativeArgument { param, value }.into()
}

#[cold]
pub(crate) fn len_exceeds_cap(len: usize, cap: usize) -> InterpretError {
    InterpretErrorKind::LenExceedsCap { len, cap }.into()
}

// Kind Errors

#[cold]
pub(crate) fn unsupported_kind(ty: &DynType) -> InterpretError {
    InterpretErrorKind::UnsupportedKind {
        kind: ty.kind(),
        ty: ty.clone(),
    }
    .into()
}

// Invalid Operation Errors

#[cold]
pub(crate) fn close_of_closed_channel() -> InterpretError {
    InterpretErrorKind::CloseOfClosedChannel.into()
}

#[cold]
pub(crate) fn close_of_nil_channel() -> InterpretError {
    InterpretErrorKind::CloseOfNilChannel.into()
}

#[cold]
pub(crate) fn no_length(got: DynType) -> InterpretError {
    InterpretErrorKind::NoLength { got }.into()
}

#[cold]
pub(crate) fn no_capacity(got: DynType) -> InterpretError {
    InterpretErrorKind::NoCapacity { got }.into()
}

// Resource Errors

#[cold]
pub(crate) fn allocation_limit(param: SizeParam, requested: usize, limit: usize) -> InterpretError {
    InterpretErrorKind::AllocationLimit {
        param,
        requested,
        limit,
    }
    .into()
}

#[cold]
pub(crate) fn allocation_failed(requested: usize) -> InterpretError {
    InterpretErrorKind::AllocationFailed { requested }.into()
}

// Internal Errors

#[cold]
pub(crate) fn panicked(builtin: Builtin, message: String) -> InterpretError {
    InterpretErrorKind::Panicked { builtin, message }.into()
}
