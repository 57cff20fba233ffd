/// Replay buffer behind both `repeat` adapters.
///
/// The first pass records every element it yields. Once the source is
/// exhausted the buffer is sealed and replays its contents by index modulo
/// length, so the working state stays constant no matter how many cycles are
/// consumed.
#[derive(Debug, Clone)]
pub(crate) struct CycleBuffer<T> {
    items: Vec<T>,
    pos: usize,
}

impl<T: Clone> CycleBuffer<T> {
    #[inline]
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
            pos: 0,
        }
    }

    /// Records an element yielded during the first pass.
    #[inline]
    pub(crate) fn record(&mut self, item: &T) {
        self.items.push(item.clone());
    }

    /// Marks the end of the first pass.
    pub(crate) fn seal(&mut self) {
        if self.items.is_empty() {
            tracing::debug!("repeat source was empty, nothing to cycle");
        } else {
            tracing::debug!(buffered = self.items.len(), "repeat source exhausted, cycling buffer");
        }
        self.items.shrink_to_fit();
        self.pos = 0;
    }

    /// Next element of the cycle, or `None` if nothing was recorded.
    #[inline]
    pub(crate) fn replay(&mut self) -> Option<T> {
        let item = self.items.get(self.pos)?.clone();
        self.pos = (self.pos + 1) % self.items.len();
        Some(item)
    }

    #[inline]
    pub(crate) fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
