//! Allocation hints for pipelines.
//!
//! [`SeqConfig`] tunes the buffers that a handful of operations allocate:
//! the output vector of `collect` and the cycle buffer of `repeat`. It never
//! changes which elements a pipeline produces, only how much memory is
//! reserved up front.
//!
//! A config is attached when a handle is created and flows through every
//! intermediate operation, so the terminal at the end of a chain sees the
//! config of the handle at its start.
//!
//! # Example
//!
//! ```ignore
//! use seqkit::{wrap_with_config, SeqConfig};
//!
//! // Expecting ~1000 elements at the end of the pipeline
//! let config = SeqConfig::new().with_collect_capacity(1024);
//! let evens = wrap_with_config(0..2000, config)
//!     .filter(|n| n % 2 == 0)
//!     .collect();
//! ```

/// Allocation hints carried by `Seq` and `AsyncSeq` handles.
///
/// # Default Values
///
/// | Setting | Default | Used by |
/// |---------|---------|---------|
/// | `collect_capacity` | 0 | `collect`, `try_collect` |
/// | `repeat_capacity` | 0 | `repeat` |
///
/// `collect` reserves the larger of `collect_capacity` and the lower bound of
/// the pipeline's size hint, so the default already behaves like
/// `Iterator::collect`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeqConfig {
    /// Minimum capacity reserved by `collect` and `try_collect`.
    pub collect_capacity: usize,

    /// Capacity reserved for the first-pass buffer of `repeat`.
    ///
    /// Set this to the expected source length to avoid regrowing the buffer
    /// while the first pass runs.
    pub repeat_capacity: usize,
}

impl Default for SeqConfig {
    #[inline]
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl SeqConfig {
    /// Default configuration, usable in const contexts.
    pub const DEFAULT: Self = Self {
        collect_capacity: 0,
        repeat_capacity: 0,
    };

    /// Creates a new configuration with default values.
    #[inline]
    pub const fn new() -> Self {
        Self::DEFAULT
    }

    /// Hints for short pipelines (tens of elements).
    pub const fn small() -> Self {
        Self {
            collect_capacity: 16,
            repeat_capacity: 16,
        }
    }

    /// Hints for pipelines of a few hundred elements.
    pub const fn medium() -> Self {
        Self {
            collect_capacity: 256,
            repeat_capacity: 256,
        }
    }

    /// Hints for pipelines of thousands of elements.
    pub const fn large() -> Self {
        Self {
            collect_capacity: 4096,
            repeat_capacity: 4096,
        }
    }

    /// Sets the minimum capacity reserved by `collect`.
    #[inline]
    pub const fn with_collect_capacity(mut self, capacity: usize) -> Self {
        self.collect_capacity = capacity;
        self
    }

    /// Sets the capacity reserved for the `repeat` buffer.
    #[inline]
    pub const fn with_repeat_capacity(mut self, capacity: usize) -> Self {
        self.repeat_capacity = capacity;
        self
    }

    /// Capacity to reserve for a collect whose source reports `lower` as the
    /// lower bound of its size hint.
    #[inline]
    pub(crate) fn collect_reserve(&self, lower: usize) -> usize {
        self.collect_capacity.max(lower)
    }
}

/// Capacities stay within `u16` range so fuzzed configs never trip an
/// allocation failure.
#[cfg(feature = "fuzz")]
impl<'a> arbitrary::Arbitrary<'a> for SeqConfig {
    fn arbitrary(u: &mut arbitrary::Unstructured<'a>) -> arbitrary::Result<Self> {
        Ok(Self::new()
            .with_collect_capacity(usize::from(u.arbitrary::<u16>()?))
            .with_repeat_capacity(usize::from(u.arbitrary::<u16>()?)))
    }
}
