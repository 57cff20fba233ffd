//! Stream adapters backing [`AsyncSeq`](super::AsyncSeq).
//!
//! Each adapter mirrors its synchronous counterpart pull for pull. The only
//! difference is `Poll::Pending`: an adapter returns it straight through and
//! keeps whatever partial progress it made (skipped count, a zipped left
//! element, the active inner stream), so the next poll resumes where the
//! last one stopped without pulling anything twice.
//!
//! All adapters require `Unpin` inputs. Handles store their stream as
//! `Pin<Box<dyn Stream>>`, which is always `Unpin`, so this costs callers
//! nothing. Adapters that hold closures or buffered elements implement
//! `Unpin` by hand since they never pin-project into those fields.

use core::pin::Pin;
use core::task::{Context, Poll};

use futures_core::Stream;

use crate::cycle::CycleBuffer;

/// Stream over a synchronous iterator; every poll is immediately ready.
pub struct Iter<I> {
    iter: I,
}

impl<I> Iter<I> {
    pub(crate) fn new(iter: I) -> Self {
        Self { iter }
    }
}

impl<I> Unpin for Iter<I> {}

impl<I: Iterator> Stream for Iter<I> {
    type Item = I::Item;

    #[inline]
    fn poll_next(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        Poll::Ready(self.get_mut().iter.next())
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

/// Created by [`AsyncSeq::take`](super::AsyncSeq::take).
pub struct Take<S> {
    stream: S,
    remaining: usize,
}

impl<S> Take<S> {
    pub(crate) fn new(stream: S, n: usize) -> Self {
        Self {
            stream,
            remaining: n,
        }
    }
}

impl<S: Stream + Unpin> Stream for Take<S> {
    type Item = S::Item;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();
        if this.remaining == 0 {
            return Poll::Ready(None);
        }
        match Pin::new(&mut this.stream).poll_next(cx) {
            Poll::Ready(Some(item)) => {
                this.remaining -= 1;
                Poll::Ready(Some(item))
            }
            Poll::Ready(None) => Poll::Ready(None),
            Poll::Pending => Poll::Pending,
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.remaining == 0 {
            return (0, Some(0));
        }
        let (lower, upper) = self.stream.size_hint();
        let lower = lower.min(self.remaining);
        let upper = match upper {
            Some(upper) => upper.min(self.remaining),
            None => self.remaining,
        };
        (lower, Some(upper))
    }
}

/// Created by [`AsyncSeq::skip`](super::AsyncSeq::skip).
pub struct Skip<S> {
    stream: S,
    remaining: usize,
}

impl<S> Skip<S> {
    pub(crate) fn new(stream: S, n: usize) -> Self {
        Self {
            stream,
            remaining: n,
        }
    }
}

impl<S: Stream + Unpin> Stream for Skip<S> {
    type Item = S::Item;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();
        loop {
            match Pin::new(&mut this.stream).poll_next(cx) {
                Poll::Ready(Some(item)) => {
                    if this.remaining == 0 {
                        return Poll::Ready(Some(item));
                    }
                    this.remaining -= 1;
                }
                Poll::Ready(None) => return Poll::Ready(None),
                Poll::Pending => return Poll::Pending,
            }
        }
    }
}

/// Created by [`AsyncSeq::map`](super::AsyncSeq::map).
pub struct Map<S, F> {
    stream: S,
    f: F,
}

impl<S, F> Map<S, F> {
    pub(crate) fn new(stream: S, f: F) -> Self {
        Self { stream, f }
    }
}

impl<S: Unpin, F> Unpin for Map<S, F> {}

impl<S, F, U> Stream for Map<S, F>
where
    S: Stream + Unpin,
    F: FnMut(S::Item) -> U,
{
    type Item = U;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<U>> {
        let this = self.get_mut();
        match Pin::new(&mut this.stream).poll_next(cx) {
            Poll::Ready(Some(item)) => Poll::Ready(Some((this.f)(item))),
            Poll::Ready(None) => Poll::Ready(None),
            Poll::Pending => Poll::Pending,
        }
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.stream.size_hint()
    }
}

/// Created by [`AsyncSeq::filter`](super::AsyncSeq::filter).
pub struct Filter<S, P> {
    stream: S,
    predicate: P,
}

impl<S, P> Filter<S, P> {
    pub(crate) fn new(stream: S, predicate: P) -> Self {
        Self { stream, predicate }
    }
}

impl<S: Unpin, P> Unpin for Filter<S, P> {}

impl<S, P> Stream for Filter<S, P>
where
    S: Stream + Unpin,
    P: FnMut(&S::Item) -> bool,
{
    type Item = S::Item;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();
        loop {
            match Pin::new(&mut this.stream).poll_next(cx) {
                Poll::Ready(Some(item)) => {
                    if (this.predicate)(&item) {
                        return Poll::Ready(Some(item));
                    }
                }
                Poll::Ready(None) => return Poll::Ready(None),
                Poll::Pending => return Poll::Pending,
            }
        }
    }
}

/// Created by [`AsyncSeq::tap`](super::AsyncSeq::tap).
pub struct Tap<S, F> {
    stream: S,
    f: F,
}

impl<S, F> Tap<S, F> {
    pub(crate) fn new(stream: S, f: F) -> Self {
        Self { stream, f }
    }
}

impl<S: Unpin, F> Unpin for Tap<S, F> {}

impl<S, F> Stream for Tap<S, F>
where
    S: Stream + Unpin,
    F: FnMut(&S::Item),
{
    type Item = S::Item;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();
        match Pin::new(&mut this.stream).poll_next(cx) {
            Poll::Ready(Some(item)) => {
                (this.f)(&item);
                Poll::Ready(Some(item))
            }
            Poll::Ready(None) => Poll::Ready(None),
            Poll::Pending => Poll::Pending,
        }
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.stream.size_hint()
    }
}

/// Maps each element to an inner stream and yields the inner elements in
/// order, draining one inner stream before pulling the next outer element.
///
/// Created by [`AsyncSeq::flat_map`](super::AsyncSeq::flat_map) and
/// [`AsyncSeq::flatten`](super::AsyncSeq::flatten).
pub struct FlatMap<S, F, U> {
    stream: S,
    f: F,
    inner: Option<U>,
}

impl<S, F, U> FlatMap<S, F, U> {
    pub(crate) fn new(stream: S, f: F) -> Self {
        Self {
            stream,
            f,
            inner: None,
        }
    }
}

impl<S: Unpin, F, U: Unpin> Unpin for FlatMap<S, F, U> {}

impl<S, F, U> Stream for FlatMap<S, F, U>
where
    S: Stream + Unpin,
    F: FnMut(S::Item) -> U,
    U: Stream + Unpin,
{
    type Item = U::Item;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();
        loop {
            if let Some(inner) = this.inner.as_mut() {
                match Pin::new(inner).poll_next(cx) {
                    Poll::Ready(Some(item)) => return Poll::Ready(Some(item)),
                    Poll::Ready(None) => this.inner = None,
                    Poll::Pending => return Poll::Pending,
                }
            }
            match Pin::new(&mut this.stream).poll_next(cx) {
                Poll::Ready(Some(outer)) => this.inner = Some((this.f)(outer)),
                Poll::Ready(None) => return Poll::Ready(None),
                Poll::Pending => return Poll::Pending,
            }
        }
    }
}

/// Created by [`AsyncSeq::repeat`](super::AsyncSeq::repeat).
pub struct Repeat<S: Stream> {
    source: Option<S>,
    buffer: CycleBuffer<S::Item>,
}

impl<S> Repeat<S>
where
    S: Stream,
    S::Item: Clone,
{
    pub(crate) fn new(stream: S, capacity: usize) -> Self {
        Self {
            source: Some(stream),
            buffer: CycleBuffer::with_capacity(capacity),
        }
    }
}

impl<S: Stream + Unpin> Unpin for Repeat<S> {}

impl<S> Stream for Repeat<S>
where
    S: Stream + Unpin,
    S::Item: Clone,
{
    type Item = S::Item;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();
        if let Some(source) = this.source.as_mut() {
            match Pin::new(source).poll_next(cx) {
                Poll::Ready(Some(item)) => {
                    this.buffer.record(&item);
                    return Poll::Ready(Some(item));
                }
                Poll::Ready(None) => {
                    this.source = None;
                    this.buffer.seal();
                }
                Poll::Pending => return Poll::Pending,
            }
        }
        Poll::Ready(this.buffer.replay())
    }
}

/// Created by [`AsyncSeq::zip`](super::AsyncSeq::zip).
///
/// The left stream is polled to readiness before the right one is polled.
/// If the right side suspends, the left element is held until the next poll.
pub struct Zip<A: Stream, B> {
    left: A,
    right: B,
    pending: Option<A::Item>,
}

impl<A: Stream, B> Zip<A, B> {
    pub(crate) fn new(left: A, right: B) -> Self {
        Self {
            left,
            right,
            pending: None,
        }
    }
}

impl<A: Stream + Unpin, B: Unpin> Unpin for Zip<A, B> {}

impl<A, B> Stream for Zip<A, B>
where
    A: Stream + Unpin,
    B: Stream + Unpin,
{
    type Item = (A::Item, B::Item);

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();
        let left = match this.pending.take() {
            Some(left) => left,
            None => match Pin::new(&mut this.left).poll_next(cx) {
                Poll::Ready(Some(left)) => left,
                Poll::Ready(None) => return Poll::Ready(None),
                Poll::Pending => return Poll::Pending,
            },
        };
        match Pin::new(&mut this.right).poll_next(cx) {
            Poll::Ready(Some(right)) => Poll::Ready(Some((left, right))),
            Poll::Ready(None) => Poll::Ready(None),
            Poll::Pending => {
                this.pending = Some(left);
                Poll::Pending
            }
        }
    }
}

/// Created by [`AsyncSeq::intersperse`](super::AsyncSeq::intersperse).
pub struct Intersperse<S: Stream> {
    stream: S,
    delim: S::Item,
    pending: Option<S::Item>,
    started: bool,
}

impl<S: Stream> Intersperse<S> {
    pub(crate) fn new(stream: S, delim: S::Item) -> Self {
        Self {
            stream,
            delim,
            pending: None,
            started: false,
        }
    }
}

impl<S: Stream + Unpin> Unpin for Intersperse<S> {}

impl<S> Stream for Intersperse<S>
where
    S: Stream + Unpin,
    S::Item: Clone,
{
    type Item = S::Item;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();
        if let Some(item) = this.pending.take() {
            return Poll::Ready(Some(item));
        }
        match Pin::new(&mut this.stream).poll_next(cx) {
            Poll::Ready(Some(item)) if this.started => {
                this.pending = Some(item);
                Poll::Ready(Some(this.delim.clone()))
            }
            Poll::Ready(Some(item)) => {
                this.started = true;
                Poll::Ready(Some(item))
            }
            Poll::Ready(None) => Poll::Ready(None),
            Poll::Pending => Poll::Pending,
        }
    }
}

/// Created by [`AsyncSeq::enumerate`](super::AsyncSeq::enumerate).
pub struct Enumerate<S> {
    stream: S,
    index: usize,
}

impl<S> Enumerate<S> {
    pub(crate) fn new(stream: S) -> Self {
        Self { stream, index: 0 }
    }
}

impl<S: Stream + Unpin> Stream for Enumerate<S> {
    type Item = (S::Item, usize);

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();
        match Pin::new(&mut this.stream).poll_next(cx) {
            Poll::Ready(Some(item)) => {
                let index = this.index;
                this.index += 1;
                Poll::Ready(Some((item, index)))
            }
            Poll::Ready(None) => Poll::Ready(None),
            Poll::Pending => Poll::Pending,
        }
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.stream.size_hint()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::task::Waker;

    /// Yields `Pending` on every other poll.
    struct Flaky<I> {
        iter: I,
        ready: bool,
    }

    impl<I: Iterator + Unpin> Stream for Flaky<I> {
        type Item = I::Item;

        fn poll_next(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<Option<I::Item>> {
            let this = self.get_mut();
            this.ready = !this.ready;
            if this.ready {
                Poll::Ready(this.iter.next())
            } else {
                Poll::Pending
            }
        }
    }

    fn flaky<I: IntoIterator>(items: I) -> Flaky<I::IntoIter> {
        Flaky {
            iter: items.into_iter(),
            ready: true,
        }
    }

    fn drain<S: Stream + Unpin>(mut stream: S) -> Vec<S::Item> {
        let mut cx = Context::from_waker(Waker::noop());
        let mut out = Vec::new();
        loop {
            match Pin::new(&mut stream).poll_next(&mut cx) {
                Poll::Ready(Some(item)) => out.push(item),
                Poll::Ready(None) => return out,
                Poll::Pending => {}
            }
        }
    }

    #[test]
    fn test_zip_holds_left_across_pending_right() {
        let zip = Zip::new(Iter::new([1, 2, 3].into_iter()), flaky(['a', 'b']));
        assert_eq!(drain(zip), vec![(1, 'a'), (2, 'b')]);
    }

    #[test]
    fn test_skip_keeps_count_across_pending() {
        assert_eq!(drain(Skip::new(flaky(0..6), 4)), vec![4, 5]);
    }

    #[test]
    fn test_flat_map_resumes_inner_after_pending() {
        let stream = FlatMap::new(Iter::new([2, 0, 1].into_iter()), |n: usize| flaky(0..n));
        assert_eq!(drain(stream), vec![0, 1, 0]);
    }

    #[test]
    fn test_take_size_hint_is_bounded() {
        let take = Take::new(Iter::new(0..100), 3);
        assert_eq!(take.size_hint(), (3, Some(3)));
        assert_eq!(drain(take), vec![0, 1, 2]);
    }

    #[test]
    fn test_repeat_replays_after_pending_first_pass() {
        let repeat = Take::new(Repeat::new(flaky([1, 2]), 0), 5);
        assert_eq!(drain(repeat), vec![1, 2, 1, 2, 1]);
    }
}
