//! Runtime channels.
//!
//! A `ChannelValue` is a handle: clones refer to the same channel, so
//! closing through one handle is observed by all of them. State lives
//! behind a `parking_lot::Mutex` paired with a `Condvar` that is signalled
//! on every transition (item pushed, item taken, receiver parked, close).
//!
//! # Semantics
//!
//! - A buffered channel accepts sends while fewer than `capacity` items
//!   are waiting.
//! - An unbuffered channel (`capacity == 0`) accepts a send only while a
//!   receiver is parked in `recv`, which then takes the item.
//! - After `close`, sends fail; receivers drain what is buffered and then
//!   observe the closed state.

use std::collections::VecDeque;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use parking_lot::{Condvar, Mutex};

use crate::ty::DynType;

use super::Value;

/// Failure of a channel send or close.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ChannelError {
    #[error("close of closed channel")]
    AlreadyClosed,
    #[error("send on closed channel")]
    SendOnClosed,
    #[error("channel is full")]
    Full,
    #[error("cannot send {got} on {channel}")]
    ElementType { channel: DynType, got: DynType },
}

/// Why a non-blocking receive produced nothing.
#[derive(Copy, Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TryRecvError {
    #[error("channel is empty")]
    Empty,
    #[error("channel is closed and drained")]
    Closed,
}

struct Channel {
    elem: DynType,
    capacity: usize,
    state: Mutex<ChannelState>,
    changed: Condvar,
}

#[derive(Default)]
struct ChannelState {
    buffer: VecDeque<Value>,
    closed: bool,
    parked_receivers: usize,
}

impl ChannelState {
    fn has_room(&self, capacity: usize) -> bool {
        self.buffer.len() < capacity.saturating_add(self.parked_receivers)
    }
}

/// Shared handle to a typed channel.
#[derive(Clone)]
pub struct ChannelValue(Arc<Channel>);

impl ChannelValue {
    pub(super) fn new(elem: DynType, capacity: usize) -> Self {
        ChannelValue(Arc::new(Channel {
            elem,
            capacity,
            state: Mutex::new(ChannelState::default()),
            changed: Condvar::new(),
        }))
    }

    #[inline]
    pub fn elem_type(&self) -> &DynType {
        &self.0.elem
    }

    /// Buffer size requested at construction; 0 for unbuffered.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.0.capacity
    }

    /// Number of items currently buffered.
    ///
    /// Items in flight to a parked receiver of an unbuffered channel are
    /// not counted.
    pub fn len(&self) -> usize {
        self.0.state.lock().buffer.len().min(self.0.capacity)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_closed(&self) -> bool {
        self.0.state.lock().closed
    }

    /// The `chan elem` descriptor of this channel.
    pub fn chan_type(&self) -> DynType {
        DynType::chan_of(self.0.elem.clone())
    }

    /// Close the channel for every holder.
    pub fn close(&self) -> Result<(), ChannelError> {
        let mut state = self.0.state.lock();
        if state.closed {
            return Err(ChannelError::AlreadyClosed);
        }
        state.closed = true;
        drop(state);
        self.0.changed.notify_all();
        Ok(())
    }

    /// Send without blocking.
    pub fn try_send(&self, value: Value) -> Result<(), ChannelError> {
        self.check_elem(&value)?;
        let mut state = self.0.state.lock();
        if state.closed {
            return Err(ChannelError::SendOnClosed);
        }
        if !state.has_room(self.0.capacity) {
            return Err(ChannelError::Full);
        }
        state.buffer.push_back(value);
        drop(state);
        self.0.changed.notify_all();
        Ok(())
    }

    /// Send, blocking until there is room or the channel is closed.
    pub fn send(&self, value: Value) -> Result<(), ChannelError> {
        self.check_elem(&value)?;
        let mut state = self.0.state.lock();
        loop {
            if state.closed {
                return Err(ChannelError::SendOnClosed);
            }
            if state.has_room(self.0.capacity) {
                state.buffer.push_back(value);
                drop(state);
                self.0.changed.notify_all();
                return Ok(());
            }
            self.0.changed.wait(&mut state);
        }
    }

    /// Receive without blocking.
    pub fn try_recv(&self) -> Result<Value, TryRecvError> {
        let mut state = self.0.state.lock();
        match state.buffer.pop_front() {
            Some(value) => {
                drop(state);
                self.0.changed.notify_all();
                Ok(value)
            }
            None if state.closed => Err(TryRecvError::Closed),
            None => Err(TryRecvError::Empty),
        }
    }

    /// Receive, blocking until an item arrives or the channel is closed.
    ///
    /// Returns `None` once the channel is closed and drained.
    pub fn recv(&self) -> Option<Value> {
        let mut state = self.0.state.lock();
        state.parked_receivers = state.parked_receivers.saturating_add(1);
        self.0.changed.notify_all();
        let received = loop {
            if let Some(value) = state.buffer.pop_front() {
                break Some(value);
            }
            if state.closed {
                break None;
            }
            self.0.changed.wait(&mut state);
        };
        state.parked_receivers = state.parked_receivers.saturating_sub(1);
        drop(state);
        self.0.changed.notify_all();
        received
    }

    fn check_elem(&self, value: &Value) -> Result<(), ChannelError> {
        if value.is_of_type(&self.0.elem) {
            Ok(())
        } else {
            Err(ChannelError::ElementType {
                channel: self.chan_type(),
                got: value.type_of(),
            })
        }
    }
}

impl PartialEq for ChannelValue {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for ChannelValue {}

impl Hash for ChannelValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::ptr::hash(Arc::as_ptr(&self.0), state);
    }
}

impl fmt::Debug for ChannelValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Chan({}, {}/{})",
            self.chan_type(),
            self.len(),
            self.0.capacity
        )
    }
}
