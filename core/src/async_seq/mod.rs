//! The asynchronous sequence handle.
//!
//! [`AsyncSeq`] is the suspending twin of [`Seq`](crate::Seq). It wraps any
//! [`Stream`] and offers the same intermediate operations, each returning a
//! new `AsyncSeq`, and the same terminal operations as `async fn`s.
//!
//! # Suspension
//!
//! The engine adds no suspension points of its own. A pull suspends only when
//! the underlying stream returns `Poll::Pending`, and at most one pull is in
//! flight per sequence. `zip` drives its two sides one after the other, never
//! concurrently.
//!
//! # Example
//!
//! ```ignore
//! use seqkit::wrap_async;
//!
//! async fn first_even_square(rx: impl futures_core::Stream<Item = u32>) -> Option<u32> {
//!     wrap_async(rx)
//!         .map(|n| n * n)
//!         .filter(|n| n % 2 == 0)
//!         .first()
//!         .await
//! }
//! ```

mod adapters;

use core::fmt;
use core::future::Future;
use core::iter::Sum;
use core::pin::Pin;
use core::task::{Context, Poll};

use futures_core::Stream;

use adapters::{Enumerate, Filter, FlatMap, Intersperse, Iter, Map, Repeat, Skip, Take, Tap, Zip};

use crate::{Error, SeqConfig};

/// Wraps an asynchronous source in an [`AsyncSeq`] handle with the default
/// config.
#[inline]
pub fn wrap_async<'a, S>(source: S) -> AsyncSeq<'a, S::Item>
where
    S: Stream + 'a,
{
    wrap_async_with_config(source, SeqConfig::DEFAULT)
}

/// Wraps an asynchronous source in an [`AsyncSeq`] handle with the given
/// config.
#[inline]
pub fn wrap_async_with_config<'a, S>(source: S, config: SeqConfig) -> AsyncSeq<'a, S::Item>
where
    S: Stream + 'a,
{
    AsyncSeq {
        stream: Box::pin(source),
        config,
    }
}

/// A lazy asynchronous sequence.
///
/// `AsyncSeq` is itself a [`Stream`] and is always `Unpin`, so handles can be
/// nested inside [`flatten`](AsyncSeq::flatten) or passed to
/// [`zip`](AsyncSeq::zip).
///
/// The boxed stream carries no `Send` bound, which lets pipelines capture
/// `Rc` and `Cell` state. A future that holds an `AsyncSeq` across an
/// `.await` is therefore not `Send` either; run it on a `LocalSet` when a
/// spawned task is needed.
#[must_use = "sequences are lazy and do nothing unless a terminal operation is awaited"]
pub struct AsyncSeq<'a, T> {
    stream: Pin<Box<dyn Stream<Item = T> + 'a>>,
    config: SeqConfig,
}

impl<T> fmt::Debug for AsyncSeq<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AsyncSeq")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl<T> Stream for AsyncSeq<'_, T> {
    type Item = T;

    #[inline]
    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<T>> {
        self.stream.as_mut().poll_next(cx)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.stream.size_hint()
    }
}

/// Future that pulls one element from a stream.
///
/// Returned by [`AsyncSeq::next`].
#[must_use = "futures do nothing unless you `.await` or poll them"]
#[derive(Debug)]
pub struct Next<'s, S: ?Sized> {
    stream: &'s mut S,
}

impl<S: Stream + Unpin + ?Sized> Future for Next<'_, S> {
    type Output = Option<S::Item>;

    #[inline]
    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut *self.stream).poll_next(cx)
    }
}

impl<'a, T: 'a> AsyncSeq<'a, T> {
    /// Same as [`wrap_async`].
    #[inline]
    pub fn new<S>(source: S) -> Self
    where
        S: Stream<Item = T> + 'a,
    {
        wrap_async(source)
    }

    /// Wraps a synchronous source; every pull is immediately ready.
    #[inline]
    pub fn from_sync<I>(source: I) -> Self
    where
        I: IntoIterator<Item = T>,
        I::IntoIter: 'a,
    {
        wrap_async(Iter::new(source.into_iter()))
    }

    #[inline]
    fn pipe<U, S>(stream: S, config: SeqConfig) -> AsyncSeq<'a, U>
    where
        S: Stream<Item = U> + 'a,
    {
        AsyncSeq {
            stream: Box::pin(stream),
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

    /// Pulls the next element.
    #[inline]
    pub fn next(&mut self) -> Next<'_, Self> {
        Next { stream: self }
    }

    // -------------------------------------------------------------------------
    // Intermediate operations
    // -------------------------------------------------------------------------

    /// Yields at most `n` leading elements; never polls the source after the
    /// nth.
    #[inline]
    pub fn take(self, n: usize) -> AsyncSeq<'a, T> {
        Self::pipe(Take::new(self.stream, n), self.config)
    }

    /// Drops the first `n` elements on the first pull, then yields the rest.
    #[inline]
    pub fn skip(self, n: usize) -> AsyncSeq<'a, T> {
        Self::pipe(Skip::new(self.stream, n), self.config)
    }

    /// Yields `f(x)` for every element `x`.
    #[inline]
    pub fn map<U, F>(self, f: F) -> AsyncSeq<'a, U>
    where
        F: FnMut(T) -> U + 'a,
        U: 'a,
    {
        Self::pipe(Map::new(self.stream, f), self.config)
    }

    /// Yields the elements for which `predicate` holds.
    #[inline]
    pub fn filter<P>(self, predicate: P) -> AsyncSeq<'a, T>
    where
        P: FnMut(&T) -> bool + 'a,
    {
        Self::pipe(Filter::new(self.stream, predicate), self.config)
    }

    /// Calls `f` on each element as it is pulled, then yields it unchanged.
    #[inline]
    pub fn tap<F>(self, f: F) -> AsyncSeq<'a, T>
    where
        F: FnMut(&T) + 'a,
    {
        Self::pipe(Tap::new(self.stream, f), self.config)
    }

    /// Concatenates a sequence of streams, draining each before pulling the
    /// next. Inner streams may be raw streams or other handles.
    #[inline]
    pub fn flatten(self) -> AsyncSeq<'a, T::Item>
    where
        T: Stream + Unpin,
        T::Item: 'a,
    {
        self.flat_map(|inner| inner)
    }

    /// Maps every element to a stream and concatenates the results in a
    /// single pass.
    #[inline]
    pub fn flat_map<U, F>(self, f: F) -> AsyncSeq<'a, U::Item>
    where
        F: FnMut(T) -> U + 'a,
        U: Stream + Unpin + 'a,
        U::Item: 'a,
    {
        Self::pipe(FlatMap::new(self.stream, f), self.config)
    }

    /// Yields the source once, buffering it, then cycles the buffer forever.
    ///
    /// The source must be finite. An empty source yields an empty sequence.
    #[inline]
    pub fn repeat(self) -> AsyncSeq<'a, T>
    where
        T: Clone,
    {
        let capacity = self.config.repeat_capacity;
        Self::pipe(Repeat::new(self.stream, capacity), self.config)
    }

    /// Pairs elements of this sequence and `other` positionally, polling this
    /// side first. Ends as soon as either side ends.
    #[inline]
    pub fn zip<S>(self, other: S) -> AsyncSeq<'a, (T, S::Item)>
    where
        S: Stream + 'a,
        S::Item: 'a,
    {
        Self::pipe(Zip::new(self.stream, Box::pin(other)), self.config)
    }

    /// [`zip`](AsyncSeq::zip) followed by `f(a, b)` on each pair.
    #[inline]
    pub fn zip_with<S, U, F>(self, other: S, mut f: F) -> AsyncSeq<'a, U>
    where
        S: Stream + 'a,
        S::Item: 'a,
        F: FnMut(T, S::Item) -> U + 'a,
        U: 'a,
    {
        self.zip(other).map(move |(a, b)| f(a, b))
    }

    /// Yields a clone of `delim` between every two consecutive elements.
    #[inline]
    pub fn intersperse(self, delim: T) -> AsyncSeq<'a, T>
    where
        T: Clone,
    {
        Self::pipe(Intersperse::new(self.stream, delim), self.config)
    }

    /// Pairs each element with its zero-based position: `(element, index)`.
    #[inline]
    pub fn enumerate(self) -> AsyncSeq<'a, (T, usize)> {
        Self::pipe(Enumerate::new(self.stream), self.config)
    }

    // -------------------------------------------------------------------------
    // Terminal operations
    // -------------------------------------------------------------------------

    /// Returns the element at position `n`, pulling nothing past it.
    pub async fn nth(self, n: usize) -> Option<T> {
        self.skip(n).take(1).first().await
    }

    /// Returns the first element, pulling at most one.
    pub async fn first(mut self) -> Option<T> {
        let first = self.next().await;
        tracing::trace!(op = "first", found = first.is_some(), "terminal finished");
        first
    }

    /// Resolves to `true` on the first element satisfying `predicate`; pulls
    /// nothing after it. An empty sequence gives `false`.
    pub async fn any<P>(mut self, mut predicate: P) -> bool
    where
        P: FnMut(T) -> bool,
    {
        let mut found = false;
        while let Some(item) = self.next().await {
            if predicate(item) {
                found = true;
                break;
            }
        }
        tracing::trace!(op = "any", found, "terminal finished");
        found
    }

    /// Resolves to `false` on the first element failing `predicate`; pulls
    /// nothing after it. An empty sequence gives `true`.
    pub async fn all<P>(mut self, mut predicate: P) -> bool
    where
        P: FnMut(T) -> bool,
    {
        let mut holds = true;
        while let Some(item) = self.next().await {
            if !predicate(item) {
                holds = false;
                break;
            }
        }
        tracing::trace!(op = "all", holds, "terminal finished");
        holds
    }

    /// Left fold over the whole sequence.
    pub async fn fold<A, F>(mut self, init: A, mut f: F) -> A
    where
        F: FnMut(A, T) -> A,
    {
        let mut acc = init;
        while let Some(item) = self.next().await {
            acc = f(acc, item);
        }
        tracing::trace!(op = "fold", "terminal finished");
        acc
    }

    /// Adds up every element. An empty sequence sums to the additive
    /// identity of `T`.
    ///
    /// The running total is folded through `Sum` two operands at a time, so
    /// nothing is buffered.
    pub async fn sum(mut self) -> T
    where
        T: Sum<T>,
    {
        let mut total: T = core::iter::empty::<T>().sum();
        while let Some(item) = self.next().await {
            total = [total, item].into_iter().sum();
        }
        tracing::trace!(op = "sum", "terminal finished");
        total
    }

    /// Number of elements; drains the sequence.
    pub async fn count(self) -> usize {
        self.map(|_| 1usize).sum().await
    }

    /// Drains the sequence into a vector, in order.
    pub async fn collect(mut self) -> Vec<T> {
        let mut out = Vec::with_capacity(self.config.collect_reserve(self.stream.size_hint().0));
        while let Some(item) = self.next().await {
            out.push(item);
        }
        tracing::trace!(op = "collect", len = out.len(), "terminal finished");
        out
    }

    /// Drains the sequence, calling `f` on every element.
    pub async fn for_each<F>(mut self, mut f: F)
    where
        F: FnMut(T),
    {
        while let Some(item) = self.next().await {
            f(item);
        }
        tracing::trace!(op = "for_each", "terminal finished");
    }

    /// Left fold with a fallible step; stops pulling at the first `Err`.
    pub async fn try_fold<A, E, F>(mut self, init: A, mut f: F) -> Result<A, Error<E>>
    where
        F: FnMut(A, T) -> Result<A, E>,
    {
        let mut acc = init;
        let mut index = 0;
        while let Some(item) = self.next().await {
            acc = f(acc, item).map_err(|error| Error::element(index, error))?;
            index += 1;
        }
        tracing::trace!(op = "try_fold", "terminal finished");
        Ok(acc)
    }

    /// Calls a fallible `f` on every element; stops pulling at the first
    /// `Err`.
    pub async fn try_for_each<E, F>(self, mut f: F) -> Result<(), Error<E>>
    where
        F: FnMut(T) -> Result<(), E>,
    {
        self.try_fold((), move |(), item| f(item)).await
    }
}

impl<'a, U: 'a, E: 'a> AsyncSeq<'a, Result<U, E>> {
    /// Collects a sequence of results, stopping at the first `Err`.
    pub async fn try_collect(mut self) -> Result<Vec<U>, Error<E>> {
        let mut out = Vec::with_capacity(self.config.collect_reserve(self.stream.size_hint().0));
        let mut index = 0;
        while let Some(item) = self.next().await {
            out.push(item.map_err(|error| Error::element(index, error))?);
            index += 1;
        }
        tracing::trace!(op = "try_collect", len = out.len(), "terminal finished");
        Ok(out)
    }
}

#[cfg(feature = "tokio")]
pub(crate) mod tokio_impl {
    //! Tokio channel sources.

    use super::*;
    use ::tokio::sync::mpsc;

    /// Stream over a tokio `mpsc` receiver; ends once every sender is
    /// dropped and the channel is drained.
    #[derive(Debug)]
    pub struct ReceiverStream<T> {
        rx: mpsc::Receiver<T>,
    }

    impl<T> Stream for ReceiverStream<T> {
        type Item = T;

        #[inline]
        fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<T>> {
            self.get_mut().rx.poll_recv(cx)
        }
    }

    /// Wraps a channel receiver in an [`AsyncSeq`].
    ///
    /// Handles are not `Send`, so a pipeline built here cannot cross into
    /// `tokio::spawn`. Keep the `Sender`s on the multi-thread runtime and
    /// drive the pipeline in the task that owns it, or on a
    /// `tokio::task::LocalSet` via `spawn_local`.
    pub fn from_receiver<'a, T: 'a>(rx: mpsc::Receiver<T>) -> AsyncSeq<'a, T> {
        wrap_async(ReceiverStream { rx })
    }
}
