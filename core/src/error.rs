//! Error type for fallible pipelines.
//!
//! Sources and callbacks that can fail produce `Result` elements. The
//! `try_*` terminal operations on [`Seq`](crate::Seq) and `AsyncSeq` stop at
//! the first `Err` and report it as an [`Error`], tagged with the position of
//! the element that failed.
//!
//! # Example
//!
//! ```ignore
//! use seqkit::{wrap, Error};
//!
//! let parsed = wrap(["1", "2", "x", "4"])
//!     .map(|s| s.parse::<i32>())
//!     .try_collect();
//!
//! match parsed {
//!     Err(Error::Element { index, error }) => {
//!         assert_eq!(index, 2);
//!         eprintln!("bad input: {error}");
//!     }
//!     Ok(values) => println!("{values:?}"),
//! }
//! ```

use thiserror::Error;

/// Failure of a fallible pipeline.
///
/// `E` is the caller's error type, carried through unchanged.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error<E> {
    /// Element `index` (zero-based, counted from the start of the terminal
    /// operation) was an `Err`.
    #[error("element {index} failed: {error}")]
    Element {
        /// Position of the failing element.
        index: usize,
        /// The error the element carried.
        error: E,
    },
}

impl<E> Error<E> {
    #[inline]
    pub(crate) fn element(index: usize, error: E) -> Self {
        tracing::trace!(index, "fallible pipeline stopped at failing element");
        Error::Element { index, error }
    }

    /// Position of the element that failed.
    #[inline]
    pub fn index(&self) -> usize {
        match self {
            Error::Element { index, .. } => *index,
        }
    }

    /// Returns a reference to the caller's error.
    #[inline]
    pub fn get_ref(&self) -> &E {
        match self {
            Error::Element { error, .. } => error,
        }
    }

    /// Consumes the error and returns the caller's error.
    #[inline]
    pub fn into_inner(self) -> E {
        match self {
            Error::Element { error, .. } => error,
        }
    }
}
