//! Deferred gesture delivery.
//!
//! Gesture handlers run in whatever context calls [`Button::poll`]. When
//! that is a timer callback or a tight scan loop, the work a gesture
//! triggers is better done elsewhere: [`QueueSink`] turns gestures into
//! [`GestureEvent`]s on a bounded [`EventQueue`], and the application
//! drains them when convenient.
//!
//! ```text
//! ┌─────────────┐     ┌──────────────┐     ┌──────────────┐
//! │ Button A    │────▶│              │     │              │
//! │ Button B    │────▶│  EventQueue  │────▶│  Main Loop   │
//! │ Dynamic C   │────▶│  (bounded)   │     │  (consumer)  │
//! └─────────────┘     └──────────────┘     └──────────────┘
//! ```
//!
//! [`Button::poll`]: crate::Button::poll

use core::cell::RefCell;

use critical_section::Mutex;
use heapless::Deque;
use log::warn;

use crate::button::{Gesture, Tick};
use crate::ports::GestureHandler;

/// Application-chosen identifier for the button that produced an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ButtonId(pub u8);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GestureEvent {
    pub button: ButtonId,
    pub gesture: Gesture,
}

/// FIFO of pending gesture events, usable from a `static`.
/// Producers and the consumer may run in different contexts.
pub struct EventQueue<const N: usize> {
    inner: Mutex<RefCell<Deque<GestureEvent, N>>>,
}

impl<const N: usize> EventQueue<N> {
    pub const fn new() -> Self {
        Self {
            inner: Mutex::new(RefCell::new(Deque::new())),
        }
    }

    /// Returns `false` if the queue is full (event dropped).
    pub fn push(&self, event: GestureEvent) -> bool {
        critical_section::with(|cs| self.inner.borrow_ref_mut(cs).push_back(event).is_ok())
    }

    pub fn pop(&self) -> Option<GestureEvent> {
        critical_section::with(|cs| self.inner.borrow_ref_mut(cs).pop_front())
    }

    /// Drain all pending events into a callback, in FIFO order.
    /// The callback runs outside the critical section.
    pub fn drain(&self, mut handler: impl FnMut(GestureEvent)) {
        while let Some(event) = self.pop() {
            handler(event);
        }
    }

    pub fn len(&self) -> usize {
        critical_section::with(|cs| self.inner.borrow_ref(cs).len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<const N: usize> Default for EventQueue<N> {
    fn default() -> Self {
        Self::new()
    }
}

/// [`GestureHandler`] that enqueues every gesture tagged with `button`.
pub struct QueueSink<'q, const N: usize> {
    queue: &'q EventQueue<N>,
    button: ButtonId,
    dropped: u32,
}

impl<'q, const N: usize> QueueSink<'q, N> {
    pub fn new(queue: &'q EventQueue<N>, button: ButtonId) -> Self {
        Self {
            queue,
            button,
            dropped: 0,
        }
    }

    /// Events lost because the queue was full.
    pub fn dropped(&self) -> u32 {
        self.dropped
    }

    fn enqueue(&mut self, gesture: Gesture) {
        let event = GestureEvent {
            button: self.button,
            gesture,
        };
        if !self.queue.push(event) {
            self.dropped = self.dropped.saturating_add(1);
            warn!("event queue full, dropped {:?}", event);
        }
    }
}

impl<const N: usize> GestureHandler for QueueSink<'_, N> {
    fn on_short_push(&mut self) {
        self.enqueue(Gesture::Short);
    }

    fn on_long_push(&mut self, held_ms: Tick) {
        self.enqueue(Gesture::Long { held_ms });
    }

    fn on_repeat_push(&mut self, count: u8) {
        self.enqueue(Gesture::Repeat { count });
    }

    fn on_combination_push(&mut self) {
        self.enqueue(Gesture::Combination);
    }
}
