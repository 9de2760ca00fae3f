//! Wall-clock time limits for cooperative cancellation.

use std::time::{Duration, Instant};

/// A start instant plus an optional budget.
///
/// Engines never read the clock themselves: they poll a `FnMut() -> bool`
/// predicate, and [`Deadline::as_predicate`] is the usual way to build one.
#[derive(Clone, Copy, Debug)]
pub struct Deadline {
    start: Instant,
    limit: Option<Duration>,
}

impl Deadline {
    /// A deadline that never expires.
    pub fn none() -> Self {
        Self::new(None)
    }

    /// A deadline `limit` from now.
    pub fn after(limit: Duration) -> Self {
        Self::new(Some(limit))
    }

    /// A deadline `limit` from now, or none.
    pub fn new(limit: Option<Duration>) -> Self {
        Self {
            start: Instant::now(),
            limit,
        }
    }

    /// Time since the deadline was created.
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// Returns `true` once the budget is spent.
    #[inline]
    pub fn expired(&self) -> bool {
        self.limit.is_some_and(|limit| self.start.elapsed() >= limit)
    }

    /// A predicate suitable for the engines' time-limit hook.
    pub fn as_predicate(&self) -> impl FnMut() -> bool + '_ {
        move || self.expired()
    }
}
