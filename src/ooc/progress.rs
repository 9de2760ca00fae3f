//! Progress reporting for long out-of-core runs.
//!
//! Workers report completed units with [`Progress::advance`]. Implementations
//! must not block, since the load and validation phases call them from
//! every rayon worker.

use core::fmt;
use core::sync::atomic::{AtomicU64, Ordering};
use crossbeam_utils::CachePadded;
use tracing::info;

/// Vertices colored between two progress reports.
pub const PROGRESS_BATCH: u64 = 1 << 16;

/// Stages of an out-of-core run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Reading records into the node table.
    Load,
    /// Building the priority queue.
    Heap,
    /// The sequential coloring loop.
    Color,
    /// Checking every edge.
    Validate,
}

impl Phase {
    const COUNT: usize = 4;

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Phase::Load => "load",
            Phase::Heap => "heap",
            Phase::Color => "color",
            Phase::Validate => "validate",
        })
    }
}

/// Sink for progress updates.
pub trait Progress: Sync {
    /// `done` more units of `total` finished in `phase`.
    fn advance(&self, phase: Phase, done: u64, total: u64);
}

/// Discards every update.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoProgress;

impl Progress for NoProgress {
    #[inline]
    fn advance(&self, _phase: Phase, _done: u64, _total: u64) {}
}

/// Logs an `info` event each time a phase crosses another 10%.
#[derive(Debug, Default)]
pub struct LogProgress {
    done: [CachePadded<AtomicU64>; Phase::COUNT],
}

impl LogProgress {
    /// Creates a reporter with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Units completed so far in `phase`.
    pub fn completed(&self, phase: Phase) -> u64 {
        self.done[phase.index()].load(Ordering::Relaxed)
    }
}

impl Progress for LogProgress {
    fn advance(&self, phase: Phase, done: u64, total: u64) {
        let before = self.done[phase.index()].fetch_add(done, Ordering::Relaxed);
        if total == 0 {
            return;
        }
        let after = before + done;
        let (from, to) = (before * 10 / total, after.min(total) * 10 / total);
        if to > from {
            info!(phase = %phase, percent = to * 10, done = after, total, "progress");
        }
    }
}
