use smallvec::SmallVec;
use std::collections::VecDeque;

const EVENTS_PER_FRAME_HINT: usize = 4;

pub type FrameEvents = SmallVec<Event, EVENTS_PER_FRAME_HINT>;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Event {
    /// The user or the platform asked to close the app
    Quit,
}

/// Something the main loop can poll for input events once per frame
pub trait EventSource {
    fn poll(&mut self) -> FrameEvents;
}

/// Manually fed event source
#[derive(Debug, Default)]
pub struct EventQueue {
    inner: VecDeque<Event>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn push(&mut self, evt: Event) {
        self.inner.push_back(evt);
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl EventSource for EventQueue {
    fn poll(&mut self) -> FrameEvents {
        self.inner.drain(..).collect()
    }
}

/// Headless source that emits `Quit` once `frames` polls happened.
/// With `None` it never quits on its own.
#[derive(Debug, Default)]
pub struct FrameBudget {
    remaining: Option<u64>,
    queue: EventQueue,
}

impl FrameBudget {
    pub fn new(frames: Option<u64>) -> Self {
        Self {
            remaining: frames,
            queue: EventQueue::new(),
        }
    }

    /// Queue an extra event for the next poll
    #[inline]
    pub fn push(&mut self, evt: Event) {
        self.queue.push(evt);
    }
}

impl EventSource for FrameBudget {
    fn poll(&mut self) -> FrameEvents {
        let mut events = self.queue.poll();
        if let Some(remaining) = &mut self.remaining {
            if *remaining == 0 {
                events.push(Event::Quit);
            } else {
                *remaining -= 1;
            }
        }

        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn queue_drains_on_poll() {
        let mut queue = EventQueue::new();
        queue.push(Event::Quit);
        assert_eq!(queue.poll().as_slice(), &[Event::Quit]);
        assert!(queue.poll().is_empty());
    }

    #[test]
    fn budget_quits_after_n_frames() {
        let mut source = FrameBudget::new(Some(2));
        assert!(source.poll().is_empty());
        assert!(source.poll().is_empty());
        assert_eq!(source.poll().as_slice(), &[Event::Quit]);
    }

    #[test]
    fn unlimited_budget_forwards_pushed_events() {
        let mut source = FrameBudget::new(None);
        for _ in 0..10 {
            assert!(source.poll().is_empty());
        }

        source.push(Event::Quit);
        assert!(source.poll().contains(&Event::Quit));
    }
}
