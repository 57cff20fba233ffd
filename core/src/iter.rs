//! Synchronous adapters that the standard library does not provide.
//!
//! Everything else `Seq` offers maps one-to-one onto a `core::iter` adapter
//! with the same pull contract, so only these two live here.

use crate::cycle::CycleBuffer;

/// Yields the source once while buffering it, then cycles the buffer forever.
///
/// Created by [`Seq::repeat`](crate::Seq::repeat).
pub struct Repeat<I: Iterator> {
    source: Option<I>,
    buffer: CycleBuffer<I::Item>,
}

impl<I> Repeat<I>
where
    I: Iterator,
    I::Item: Clone,
{
    pub(crate) fn new(source: I, capacity: usize) -> Self {
        Self {
            source: Some(source),
            buffer: CycleBuffer::with_capacity(capacity),
        }
    }
}

impl<I> Iterator for Repeat<I>
where
    I: Iterator,
    I::Item: Clone,
{
    type Item = I::Item;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(source) = self.source.as_mut() {
            match source.next() {
                Some(item) => {
                    self.buffer.record(&item);
                    return Some(item);
                }
                None => {
                    self.source = None;
                    self.buffer.seal();
                }
            }
        }
        self.buffer.replay()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match &self.source {
            Some(source) => (source.size_hint().0, None),
            None if self.buffer.is_empty() => (0, Some(0)),
            None => (usize::MAX, None),
        }
    }
}

/// Places a clone of `delim` between every two consecutive elements.
///
/// The delimiter is only produced once the element after it has been pulled,
/// so a trailing delimiter is never emitted.
///
/// Created by [`Seq::intersperse`](crate::Seq::intersperse).
pub struct Intersperse<I: Iterator> {
    source: I,
    delim: I::Item,
    pending: Option<I::Item>,
    started: bool,
}

impl<I> Intersperse<I>
where
    I: Iterator,
    I::Item: Clone,
{
    pub(crate) fn new(source: I, delim: I::Item) -> Self {
        Self {
            source,
            delim,
            pending: None,
            started: false,
        }
    }
}

impl<I> Iterator for Intersperse<I>
where
    I: Iterator,
    I::Item: Clone,
{
    type Item = I::Item;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(item) = self.pending.take() {
            return Some(item);
        }
        let item = self.source.next()?;
        if self.started {
            self.pending = Some(item);
            Some(self.delim.clone())
        } else {
            self.started = true;
            Some(item)
        }
    }
}
