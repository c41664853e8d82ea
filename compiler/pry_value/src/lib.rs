#![deny(clippy::arithmetic_side_effects)]
//! Pry Value - runtime values and type descriptors for the pry evaluator.
//!
//! This crate provides:
//! - `DynType` and `Kind`: first-class type descriptors, independent of values
//! - `Value`: a closed set of runtime-typed values that know their own type
//! - `ChannelValue`: shared, closable channels with buffered and rendezvous modes
//!
//! # Thread Safety
//!
//! Every type here is `Send + Sync`. Heap payloads are shared through
//! `Heap<T>` (an `Arc` newtype) and never mutated after construction;
//! the only interior mutability is a channel's state, guarded by a mutex.

mod heap;
mod ty;
mod value;

pub use heap::Heap;
pub use ty::{DynType, Kind};
pub use value::{ChannelError, ChannelValue, MapValue, SliceValue, TryRecvError, Value};

// Re-exported so callers can build map values without naming the hasher crate.
pub use rustc_hash::FxHashMap;
