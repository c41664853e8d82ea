//! `close(ch)`.

use pry_value::{DynType, Value};

use crate::builtin::Builtin;
use crate::errors::{close_of_closed_channel, close_of_nil_channel, not_a_channel, InterpretError};

/// Mark a channel closed for every handle that shares it.
///
/// Closing twice, closing a nil channel, and closing anything that is not a
/// channel are all errors; none of them touch shared state.
pub(crate) fn close(value: &Value) -> Result<(), InterpretError> {
    match value {
        // `ChannelValue::close` only fails on an already-closed channel.
        Value::Chan(ch) => ch.close().map_err(|_| close_of_closed_channel()),
        Value::Nil(DynType::Chan(_)) => Err(close_of_nil_channel()),
        other => Err(not_a_channel(Builtin::Close, other.type_of())),
    }
}
