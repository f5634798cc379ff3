//! Shared frame-sequence counter for TUIO bundles.
//!
//! Every bundle carries an `fseq` value so downstream consumers can
//! correlate bundles arriving over multiple sockets.  The counter is a
//! single process-wide instance shared (via `Arc`) by every TUIO sink;
//! frame numbers are never reused and never reset for the process lifetime.

use std::sync::atomic::{AtomicI32, Ordering};

/// A thread-safe, strictly increasing frame counter.
///
/// The first call to [`next`](FrameCounter::next) returns 1.  `Relaxed`
/// ordering is sufficient: the values only number frames, they do not
/// synchronise other memory.
#[derive(Debug, Default)]
pub struct FrameCounter {
    inner: AtomicI32,
}

impl FrameCounter {
    /// Creates a counter whose first frame number is 1.
    pub fn new() -> Self {
        Self::default()
    }

    /// Increments the counter and returns the new frame number.
    ///
    /// Two concurrent callers never observe the same value.  Wraps at
    /// `i32::MAX` without panicking.
    pub fn next(&self) -> i32 {
        self.inner.fetch_add(1, Ordering::Relaxed).wrapping_add(1)
    }

    /// Returns the most recently issued frame number without advancing.
    pub fn current(&self) -> i32 {
        self.inner.load(Ordering::Relaxed)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_first_frame_number_is_one() {
        let frames = FrameCounter::new();
        assert_eq!(frames.next(), 1);
        assert_eq!(frames.next(), 2);
    }

    #[test]
    fn test_current_does_not_advance() {
        let frames = FrameCounter::new();
        frames.next();
        assert_eq!(frames.current(), 1);
        assert_eq!(frames.current(), 1);
    }

    #[test]
    fn test_no_frame_number_is_ever_reused_across_threads() {
        // Arrange
        let frames = Arc::new(FrameCounter::new());
        let thread_count = 8;
        let frames_per_thread = 1000;

        // Act: draw frame numbers from many threads simultaneously.
        let handles: Vec<_> = (0..thread_count)
            .map(|_| {
                let counter = Arc::clone(&frames);
                thread::spawn(move || {
                    (0..frames_per_thread)
                        .map(|_| counter.next())
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        let mut all: Vec<i32> = handles
            .into_iter()
            .flat_map(|handle| handle.join().expect("thread panicked"))
            .collect();

        // Assert: every value unique, none skipped below the maximum drawn.
        all.sort_unstable();
        all.dedup();
        assert_eq!(all.len(), thread_count * frames_per_thread);
        assert_eq!(all[0], 1);
        assert_eq!(*all.last().unwrap(), (thread_count * frames_per_thread) as i32);
    }
}
