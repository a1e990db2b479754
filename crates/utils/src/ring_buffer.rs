use std::fmt;

/// A ring buffer with a fixed size `N`. When the buffer is full, new values
/// will overwrite the oldest values. Only pushed values are visible.
pub struct RingBuffer<T, const N: usize> {
    inner: [T; N],
    idx: usize,
    filled: usize,
}

impl<T, const N: usize> RingBuffer<T, N> {
    /// Creates a new empty `RingBuffer` backed by the given storage.
    pub const fn new(buff: [T; N]) -> Self {
        Self {
            inner: buff,
            idx: 0,
            filled: 0,
        }
    }

    /// Pushes a value into the ring buffer. If the buffer is full,
    /// this will overwrite the oldest value.
    pub fn push(&mut self, value: T) {
        if N == 0 {
            return;
        }

        self.inner[self.idx] = value;
        self.idx = (self.idx + 1) % N;
        self.filled = (self.filled + 1).min(N);
    }

    /// Returns an iterator over the pushed elements, in storage order.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.inner[..self.filled].iter()
    }

    /// Returns a reference to the last element that was added to the buffer,
    /// or `None` if the buffer is empty.
    pub fn last(&self) -> Option<&T> {
        if self.filled == 0 {
            return None;
        }

        let idx = if self.idx == 0 { N - 1 } else { self.idx - 1 };
        self.inner.get(idx)
    }

    /// Number of values pushed, capped at `N`
    pub fn len(&self) -> usize {
        self.filled
    }

    /// Returns if nothing has been pushed yet
    pub fn is_empty(&self) -> bool {
        self.filled == 0
    }

    /// Forget every pushed value
    pub fn clear(&mut self) {
        self.idx = 0;
        self.filled = 0;
    }
}

impl<const N: usize> RingBuffer<f32, N> {
    /// Mean of the pushed values, `0.0` when empty
    pub fn average(&self) -> f32 {
        if self.is_empty() {
            return 0.0;
        }

        self.iter().sum::<f32>() / self.filled as f32
    }
}

impl<T, const N: usize> Default for RingBuffer<T, N>
where
    T: Default + Copy,
{
    fn default() -> Self {
        Self::new([Default::default(); N])
    }
}

impl<T: Clone, const N: usize> Clone for RingBuffer<T, N> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            idx: self.idx,
            filled: self.filled,
        }
    }
}

impl<T: fmt::Debug, const N: usize> fmt::Debug for RingBuffer<T, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RingBuffer")
            .field("inner", &&self.inner[..self.filled])
            .field("idx", &self.idx)
            .finish()
    }
}
