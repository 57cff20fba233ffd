//! The synchronous sequence handle.
//!
//! [`Seq`] owns one source iterator and exposes the combinator API on top of
//! it. Intermediate operations consume the handle and return a new one
//! around a lazy adapter; nothing is pulled until a terminal operation runs.
//!
//! # Example
//!
//! ```ignore
//! use seqkit::wrap;
//!
//! let squares_of_odds = wrap(1..)
//!     .filter(|n| n % 2 == 1)
//!     .map(|n| n * n)
//!     .take(4)
//!     .collect();
//!
//! assert_eq!(squares_of_odds, vec![1, 9, 25, 49]);
//! ```
//!
//! # Shared sources
//!
//! A source is a single cursor. Wrapping `source.by_ref()` lets the caller
//! keep the cursor after the handle is gone, and whatever the pipeline
//! pulled is gone from the source as well:
//!
//! ```ignore
//! let mut source = 1..=5;
//! assert_eq!(wrap(source.by_ref()).take(2).collect(), vec![1, 2]);
//! assert_eq!(wrap(source).collect(), vec![3, 4, 5]);
//! ```

use core::fmt;
use core::iter::Sum;

use crate::iter::{Intersperse, Repeat};
use crate::{Error, SeqConfig};

/// Wraps a synchronous source in a [`Seq`] handle with the default config.
///
/// Any `IntoIterator` is accepted: collections, ranges, adapters, other
/// handles, or `&mut` borrows of an iterator.
#[inline]
pub fn wrap<'a, I>(source: I) -> Seq<'a, I::Item>
where
    I: IntoIterator,
    I::IntoIter: 'a,
{
    wrap_with_config(source, SeqConfig::DEFAULT)
}

/// Wraps a synchronous source in a [`Seq`] handle with the given config.
#[inline]
pub fn wrap_with_config<'a, I>(source: I, config: SeqConfig) -> Seq<'a, I::Item>
where
    I: IntoIterator,
    I::IntoIter: 'a,
{
    Seq {
        iter: Box::new(source.into_iter()),
        config,
    }
}

/// A lazy synchronous sequence.
///
/// `Seq` is itself an [`Iterator`], so a handle can be used anywhere a source
/// is expected, including as an element of a sequence passed to
/// [`flatten`](Seq::flatten) or as the other side of [`zip`](Seq::zip).
///
/// The inherent methods take priority over the [`Iterator`] methods of the
/// same name and follow the contracts documented on each of them.
#[must_use = "sequences are lazy and do nothing unless a terminal operation is called"]
pub struct Seq<'a, T> {
    iter: Box<dyn Iterator<Item = T> + 'a>,
    config: SeqConfig,
}

impl<T> fmt::Debug for Seq<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Seq")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl<T> Iterator for Seq<'_, T> {
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<T> {
        self.iter.next()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

impl<'a, T: 'a> Seq<'a, T> {
    /// Same as [`wrap`].
    #[inline]
    pub fn new<I>(source: I) -> Self
    where
        I: IntoIterator<Item = T>,
        I::IntoIter: 'a,
    {
        wrap(source)
    }

    #[inline]
    fn pipe<U, I>(iter: I, config: SeqConfig) -> Seq<'a, U>
    where
        I: Iterator<Item = U> + 'a,
    {
        Seq {
            iter: Box::new(iter),
            config,
        }
    }

    /// Returns the config carried by this handle.
    #[inline]
    pub fn config(&self) -> SeqConfig {
        self.config
    }

    /// Replaces the config carried by this handle and every handle derived
    /// from it.
    #[inline]
    pub fn with_config(mut self, config: SeqConfig) -> Self {
        self.config = config;
        self
    }

    /// Lifts this handle into an [`AsyncSeq`](crate::AsyncSeq) whose pulls
    /// are always immediately ready.
    #[cfg(feature = "futures")]
    #[inline]
    pub fn into_async(self) -> crate::AsyncSeq<'a, T> {
        crate::AsyncSeq::from_sync(self.iter).with_config(self.config)
    }

    // -------------------------------------------------------------------------
    // Intermediate operations
    // -------------------------------------------------------------------------

    /// Yields at most `n` leading elements.
    ///
    /// The source is never pulled again once the nth element has been
    /// produced, so this is safe on infinite sources.
    #[inline]
    pub fn take(self, n: usize) -> Seq<'a, T> {
        Self::pipe(self.iter.take(n), self.config)
    }

    /// Drops the first `n` elements, then yields the rest.
    ///
    /// The dropped elements are pulled on the first pull of the result, not
    /// when `skip` is called.
    #[inline]
    pub fn skip(self, n: usize) -> Seq<'a, T> {
        Self::pipe(self.iter.skip(n), self.config)
    }

    /// Yields `f(x)` for every element `x`.
    #[inline]
    pub fn map<U, F>(self, f: F) -> Seq<'a, U>
    where
        F: FnMut(T) -> U + 'a,
        U: 'a,
    {
        Self::pipe(self.iter.map(f), self.config)
    }

    /// Yields the elements for which `predicate` holds.
    #[inline]
    pub fn filter<P>(self, predicate: P) -> Seq<'a, T>
    where
        P: FnMut(&T) -> bool + 'a,
    {
        Self::pipe(self.iter.filter(predicate), self.config)
    }

    /// Calls `f` on each element as it is pulled, then yields it unchanged.
    #[inline]
    pub fn tap<F>(self, f: F) -> Seq<'a, T>
    where
        F: FnMut(&T) + 'a,
    {
        Self::pipe(self.iter.inspect(f), self.config)
    }

    /// Concatenates a sequence of sequences.
    ///
    /// Each inner sequence is drained before the next outer element is
    /// pulled. Inner sequences may be raw iterables or other handles.
    #[inline]
    pub fn flatten(self) -> Seq<'a, T::Item>
    where
        T: IntoIterator,
        T::IntoIter: 'a,
        T::Item: 'a,
    {
        Self::pipe(self.iter.flatten(), self.config)
    }

    /// Maps every element to a sequence and concatenates the results in a
    /// single pass.
    #[inline]
    pub fn flat_map<U, F>(self, f: F) -> Seq<'a, U::Item>
    where
        F: FnMut(T) -> U + 'a,
        U: IntoIterator + 'a,
        U::IntoIter: 'a,
        U::Item: 'a,
    {
        Self::pipe(self.iter.flat_map(f), self.config)
    }

    /// Yields the source once, buffering it, then cycles the buffer forever.
    ///
    /// The source must be finite: on an infinite source the first pass never
    /// ends and elements simply keep being buffered. An empty source yields
    /// an empty sequence.
    #[inline]
    pub fn repeat(self) -> Seq<'a, T>
    where
        T: Clone,
    {
        let capacity = self.config.repeat_capacity;
        Self::pipe(Repeat::new(self.iter, capacity), self.config)
    }

    /// Pairs elements of this sequence and `other` positionally.
    ///
    /// This side is pulled first; `other` is only pulled once this side has
    /// produced an element. The result ends as soon as either side ends.
    #[inline]
    pub fn zip<I>(self, other: I) -> Seq<'a, (T, I::Item)>
    where
        I: IntoIterator,
        I::IntoIter: 'a,
        I::Item: 'a,
    {
        Self::pipe(self.iter.zip(other), self.config)
    }

    /// [`zip`](Seq::zip) followed by `f(a, b)` on each pair.
    #[inline]
    pub fn zip_with<I, U, F>(self, other: I, mut f: F) -> Seq<'a, U>
    where
        I: IntoIterator,
        I::IntoIter: 'a,
        I::Item: 'a,
        F: FnMut(T, I::Item) -> U + 'a,
        U: 'a,
    {
        self.zip(other).map(move |(a, b)| f(a, b))
    }

    /// Yields a clone of `delim` between every two consecutive elements.
    #[inline]
    pub fn intersperse(self, delim: T) -> Seq<'a, T>
    where
        T: Clone,
    {
        Self::pipe(Intersperse::new(self.iter, delim), self.config)
    }

    /// Pairs each element with its zero-based position: `(element, index)`.
    #[inline]
    pub fn enumerate(self) -> Seq<'a, (T, usize)> {
        Self::pipe(
            self.iter.enumerate().map(|(index, item)| (item, index)),
            self.config,
        )
    }

    // -------------------------------------------------------------------------
    // Terminal operations
    // -------------------------------------------------------------------------

    /// Returns the element at position `n`, pulling nothing past it.
    #[inline]
    pub fn nth(self, n: usize) -> Option<T> {
        self.skip(n).take(1).first()
    }

    /// Returns the first element, pulling at most one.
    #[inline]
    pub fn first(mut self) -> Option<T> {
        let first = self.iter.next();
        tracing::trace!(op = "first", found = first.is_some(), "terminal finished");
        first
    }

    /// Returns `true` on the first element satisfying `predicate`; pulls
    /// nothing after it. An empty sequence gives `false`.
    pub fn any<P>(mut self, predicate: P) -> bool
    where
        P: FnMut(T) -> bool,
    {
        let found = self.iter.any(predicate);
        tracing::trace!(op = "any", found, "terminal finished");
        found
    }

    /// Returns `false` on the first element failing `predicate`; pulls
    /// nothing after it. An empty sequence gives `true`.
    pub fn all<P>(mut self, predicate: P) -> bool
    where
        P: FnMut(T) -> bool,
    {
        let holds = self.iter.all(predicate);
        tracing::trace!(op = "all", holds, "terminal finished");
        holds
    }

    /// Left fold over the whole sequence.
    pub fn fold<A, F>(self, init: A, f: F) -> A
    where
        F: FnMut(A, T) -> A,
    {
        let acc = self.iter.fold(init, f);
        tracing::trace!(op = "fold", "terminal finished");
        acc
    }

    /// Adds up every element. An empty sequence sums to the additive
    /// identity of `T`.
    pub fn sum(self) -> T
    where
        T: Sum<T>,
    {
        let total = self.iter.sum();
        tracing::trace!(op = "sum", "terminal finished");
        total
    }

    /// Number of elements; drains the sequence.
    #[inline]
    pub fn count(self) -> usize {
        self.map(|_| 1usize).sum()
    }

    /// Drains the sequence into a vector, in order.
    pub fn collect(self) -> Vec<T> {
        let mut out = Vec::with_capacity(self.config.collect_reserve(self.iter.size_hint().0));
        out.extend(self.iter);
        tracing::trace!(op = "collect", len = out.len(), "terminal finished");
        out
    }

    /// Drains the sequence, calling `f` on every element.
    pub fn for_each<F>(self, f: F)
    where
        F: FnMut(T),
    {
        self.iter.for_each(f);
        tracing::trace!(op = "for_each", "terminal finished");
    }

    /// Left fold with a fallible step; stops pulling at the first `Err`.
    pub fn try_fold<A, E, F>(self, init: A, mut f: F) -> Result<A, Error<E>>
    where
        F: FnMut(A, T) -> Result<A, E>,
    {
        let mut acc = init;
        for (index, item) in self.iter.enumerate() {
            acc = f(acc, item).map_err(|error| Error::element(index, error))?;
        }
        tracing::trace!(op = "try_fold", "terminal finished");
        Ok(acc)
    }

    /// Calls a fallible `f` on every element; stops pulling at the first
    /// `Err`.
    pub fn try_for_each<E, F>(self, mut f: F) -> Result<(), Error<E>>
    where
        F: FnMut(T) -> Result<(), E>,
    {
        self.try_fold((), move |(), item| f(item))
    }
}

impl<'a, U: 'a, E: 'a> Seq<'a, Result<U, E>> {
    /// Collects a sequence of results, stopping at the first `Err`.
    ///
    /// Nothing after the failing element is pulled.
    pub fn try_collect(self) -> Result<Vec<U>, Error<E>> {
        let mut out = Vec::with_capacity(self.config.collect_reserve(self.iter.size_hint().0));
        for (index, item) in self.iter.enumerate() {
            out.push(item.map_err(|error| Error::element(index, error))?);
        }
        tracing::trace!(op = "try_collect", len = out.len(), "terminal finished");
        Ok(out)
    }
}
