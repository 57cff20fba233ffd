//! Sample unbounded sources.
//!
//! Each call builds a fresh sequence with its own counter; nothing is shared
//! between calls.

use crate::{Seq, wrap};

/// 1, 2, 3, ...
pub fn ascending() -> Seq<'static, i64> {
    wrap(1i64..)
}

/// -1, -2, -3, ...
pub fn descending() -> Seq<'static, i64> {
    wrap((1i64..).map(|n| -n))
}

/// Asynchronous [`ascending`].
#[cfg(feature = "futures")]
pub fn ascending_async() -> crate::AsyncSeq<'static, i64> {
    ascending().into_async()
}

/// Asynchronous [`descending`].
#[cfg(feature = "futures")]
pub fn descending_async() -> crate::AsyncSeq<'static, i64> {
    descending().into_async()
}
