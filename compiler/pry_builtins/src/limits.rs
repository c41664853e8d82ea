//! Allocation limits.
//!
//! An interactive evaluator runs whatever the user types, including
//! `make([]int, 1 << 60)`. `Limits` bounds the sizes `make` and `append`
//! may produce so such input yields an error instead of aborting the
//! process on allocation failure. The host picks the policy; the defaults
//! suit an interactive session.

use crate::errors::{allocation_limit, InterpretError, SizeParam};

/// Default upper bound on a slice's length and capacity.
pub const DEFAULT_MAX_LEN: usize = 1 << 22;

/// Default upper bound on a channel's buffer size.
pub const DEFAULT_MAX_CHAN_BUFFER: usize = 1 << 20;

/// Size limits applied by the builtins.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Limits {
    max_len: usize,
    max_chan_buffer: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Limits {
            max_len: DEFAULT_MAX_LEN,
            max_chan_buffer: DEFAULT_MAX_CHAN_BUFFER,
        }
    }
}

impl Limits {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the largest slice length or capacity `make`/`append` may produce.
    #[must_use]
    pub fn with_max_len(mut self, max_len: usize) -> Self {
        self.max_len = max_len;
        self
    }

    /// Set the largest channel buffer `make` may produce.
    #[must_use]
    pub fn with_max_chan_buffer(mut self, max_chan_buffer: usize) -> Self {
        self.max_chan_buffer = max_chan_buffer;
        self
    }

    #[inline]
    pub fn max_len(&self) -> usize {
        self.max_len
    }

    #[inline]
    pub fn max_chan_buffer(&self) -> usize {
        self.max_chan_buffer
    }

    pub(crate) fn check_len(&self, param: SizeParam, requested: usize) -> Result<(), InterpretError> {
        if requested > self.max_len {
            return Err(allocation_limit(param, requested, self.max_len));
        }
        Ok(())
    }

    pub(crate) fn check_chan_buffer(&self, requested: usize) -> Result<(), InterpretError> {
        if requested > self.max_chan_buffer {
            return Err(allocation_limit(
                SizeParam::Size,
                requested,
                self.max_chan_buffer,
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorCategory;
    use pretty_assertions::assert_eq;

    #[test]
    fn defaults() {
        let limits = Limits::new();
        assert_eq!(limits.max_len(), DEFAULT_MAX_LEN);
        assert_eq!(limits.max_chan_buffer(), DEFAULT_MAX_CHAN_BUFFER);
        assert_eq!(limits, Limits::default());
    }

    #[test]
    fn builder_overrides() {
        let limits = Limits::new().with_max_len(10).with_max_chan_buffer(2);
        assert_eq!(limits.max_len(), 10);
        assert_eq!(limits.max_chan_buffer(), 2);
    }

    #[test]
    fn check_len_boundary() {
        let limits = Limits::new().with_max_len(10);
        assert!(limits.check_len(SizeParam::Len, 10).is_ok());
        let err = limits.check_len(SizeParam::Cap, 11).err();
        assert_eq!(
            err.as_ref().map(ToString::to_string).as_deref(),
            Some("cap 11 exceeds the limit of 10")
        );
        assert_eq!(
            err.map(|e| e.category()),
            Some(ErrorCategory::ResourceLimit)
        );
    }

    #[test]
    fn check_chan_buffer_boundary() {
        let limits = Limits::new().with_max_chan_buffer(0);
        assert!(limits.check_chan_buffer(0).is_ok());
        assert!(limits.check_chan_buffer(1).is_err());
    }
}
