//! Builtin selector.

use std::fmt;
use std::str::FromStr;

use crate::errors::Arity;

/// A builtin operation the evaluator can route a call to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Builtin {
    Append,
    Make,
    Close,
    Len,
    Cap,
}

impl Builtin {
    pub const ALL: [Builtin; 5] = [
        Builtin::Append,
        Builtin::Make,
        Builtin::Close,
        Builtin::Len,
        Builtin::Cap,
    ];

    /// Name as written in source.
    pub fn name(self) -> &'static str {
        match self {
            Builtin::Append => "append",
            Builtin::Make => "make",
            Builtin::Close => "close",
            Builtin::Len => "len",
            Builtin::Cap => "cap",
        }
    }

    /// Whether the call carries a type descriptor ahead of its values.
    #[inline]
    pub fn takes_type(self) -> bool {
        matches!(self, Builtin::Make)
    }

    /// Accepted count of value arguments, before any kind-specific check.
    pub fn arity(self) -> Arity {
        match self {
            Builtin::Append => Arity::AtLeast(1),
            Builtin::Make => Arity::AtMost(2),
            Builtin::Close | Builtin::Len | Builtin::Cap => Arity::Exactly(1),
        }
    }
}

impl fmt::Display for Builtin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Name that does not resolve to a builtin.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown builtin `{0}`")]
pub struct UnknownBuiltin(pub String);

impl FromStr for Builtin {
    type Err = UnknownBuiltin;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Builtin::ALL
            .into_iter()
            .find(|builtin| builtin.name() == name)
            .ok_or_else(|| UnknownBuiltin(name.to_string()))
    }
}
