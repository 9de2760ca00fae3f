//! Exact branch-and-bound DSatur.
//!
//! The search keeps an explicit stack of frames, one per colored vertex, so
//! its depth is bounded by memory rather than by the thread stack. A frame
//! pops the next vertex from the selector and tries each admissible color in
//! ascending order, bounded by the colors already in use plus one and by the
//! incumbent. Assigning a color saves and marks the saturation of every
//! affected neighbour on a trail; if a neighbour is left with no admissible
//! color the branch is cut before descending.
//!
//! A frame remembers its trail checkpoint while its vertex holds a color.
//! Leaving the frame rewinds the trail and hands the vertex back to the
//! selector, and the `Unwind` guard does the same for every open frame when
//! a time-out ends the search, so the state is exactly as it was before the
//! call.

use super::outcome::{Coloring, Outcome};
use super::selector::CandidateSelector;
use super::state::ColoringState;
use super::trail::Trail;
use crate::graph::Graph;
use serde::Serialize;
use tracing::{debug, trace};

/// Counters gathered during one exact search.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct SearchStats {
    /// Frames entered.
    pub nodes: u64,
    /// Frames that exhausted their colors.
    pub backtracks: u64,
    /// Branches cut because a neighbour ran out of colors.
    pub lookahead_cuts: u64,
    /// Frames cut because they could not beat the incumbent.
    pub bound_cuts: u64,
    /// Strictly better colorings found.
    pub improvements: u64,
}

/// The time-limit predicate tripped; the open frames are unwound.
struct TimeLimitReached;

/// Branch-and-bound search over the colorings of one graph.
pub struct ExactSearch<'g, S> {
    graph: &'g Graph,
    state: ColoringState,
    selector: S,
    trail: Trail,
    /// Colors in use after each assignment on the current path
    running: Vec<usize>,
    frames: Vec<Frame>,
    best_count: usize,
    best: Option<Coloring>,
    stats: SearchStats,
}

impl<'g, S: CandidateSelector> ExactSearch<'g, S> {
    /// Prepares a search with no incumbent (bound `n + 1`).
    pub fn new(graph: &'g Graph, mut selector: S) -> Self {
        let n = graph.vertex_count();
        let state = ColoringState::new(graph);
        selector.init(n);
        for v in graph.vertices() {
            selector.push(v, graph, &state);
        }
        Self {
            graph,
            trail: Trail::new(state.saturation().stride()),
            state,
            selector,
            running: vec![0],
            frames: Vec::new(),
            best_count: n + 1,
            best: None,
            stats: SearchStats::default(),
        }
    }

    /// Seeds the search with a known coloring; only strictly better ones are
    /// explored afterwards.
    ///
    /// # Panics
    /// Panics if `incumbent` does not cover every vertex.
    pub fn with_incumbent(mut self, incumbent: Coloring) -> Self {
        assert_eq!(incumbent.colors().len(), self.graph.vertex_count());
        if incumbent.count() < self.best_count {
            self.best_count = incumbent.count();
            self.best = Some(incumbent);
        }
        self
    }

    /// Runs the search to exhaustion or until `time_limit` returns `true`.
    ///
    /// The predicate is polled on entry to every frame and before every
    /// candidate color.
    pub fn run<F: FnMut() -> bool>(&mut self, mut time_limit: F) -> Outcome {
        let result = {
            let mut guard = Unwind { search: self };
            guard.search.search(&mut time_limit)
        };
        debug!(
            nodes = self.stats.nodes,
            backtracks = self.stats.backtracks,
            lookahead_cuts = self.stats.lookahead_cuts,
            bound_cuts = self.stats.bound_cuts,
            improvements = self.stats.improvements,
            best = self.best.as_ref().map(Coloring::count),
            timed_out = result.is_err(),
            "exact search finished"
        );
        match result {
            Ok(()) => match &self.best {
                Some(best) => Outcome::Colored(best.clone()),
                None => unreachable!("an exhausted search always reaches a complete coloring"),
            },
            Err(TimeLimitReached) => Outcome::TimedOut {
                incumbent: self.best.clone(),
            },
        }
    }

    /// Current search state. Between runs every vertex is uncolored and
    /// every saturation is empty.
    pub fn state(&self) -> &ColoringState {
        &self.state
    }

    /// Counters of the runs so far.
    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    /// Best coloring known.
    pub fn best(&self) -> Option<&Coloring> {
        self.best.as_ref()
    }

    /// Selector working set size; equals the vertex count between runs.
    pub fn pending(&self) -> usize {
        self.selector.len()
    }

    #[inline]
    fn running_max(&self) -> usize {
        self.running.last().copied().unwrap_or(0)
    }

    /// Exclusive upper bound on the colors a frame at `running` may try.
    #[inline]
    fn color_limit(&self, running: usize) -> usize {
        (running + 1)
            .min(self.best_count.saturating_sub(1))
            .min(self.state.saturation().width())
    }

    fn record_incumbent(&mut self, running: usize) {
        let Some(colors) = self.state.complete_colors() else {
            unreachable!("selector drained while vertices remain uncolored")
        };
        self.best_count = running;
        self.best = Some(Coloring::new(colors));
        self.stats.improvements += 1;
        trace!(colors = running, nodes = self.stats.nodes, "incumbent improved");
    }

    /// Opens a node of the search tree. Pushes a frame unless the node is cut
    /// by the bound or completes a coloring.
    fn enter<F: FnMut() -> bool>(&mut self, time_limit: &mut F) -> Result<(), TimeLimitReached> {
        if time_limit() {
            return Err(TimeLimitReached);
        }
        self.stats.nodes += 1;

        let running = self.running_max();
        if running >= self.best_count {
            self.stats.bound_cuts += 1;
            return Ok(());
        }
        if self.selector.is_empty() {
            self.record_incumbent(running);
            return Ok(());
        }

        let vertex = self.selector.pop(self.graph, &self.state);
        self.frames.push(Frame {
            vertex,
            next_color: 0,
            assigned: None,
        });
        Ok(())
    }

    /// Depth-first search driven by `frames`.
    ///
    /// On error the frames of the interrupted path are left on the stack for
    /// [`Unwind`] to restore.
    fn search<F: FnMut() -> bool>(&mut self, time_limit: &mut F) -> Result<(), TimeLimitReached> {
        self.enter(time_limit)?;
        while let Some(top) = self.frames.len().checked_sub(1) {
            let Frame {
                vertex,
                next_color,
                assigned,
            } = self.frames[top];
            if let Some(checkpoint) = assigned {
                self.frames[top].assigned = None;
                self.unassign(vertex, checkpoint);
            }

            // the incumbent may have tightened since the last color
            let limit = self.color_limit(self.running_max());
            let saturation = self.state.saturation();
            let Some(color) = (next_color..limit).find(|&c| !saturation.is_forbidden(vertex, c)) else {
                self.frames.pop();
                self.unpick(vertex);
                self.stats.backtracks += 1;
                continue;
            };

            if time_limit() {
                return Err(TimeLimitReached);
            }
            let checkpoint = self.assign(vertex, color);
            let frame = &mut self.frames[top];
            frame.next_color = color + 1;
            frame.assigned = Some(checkpoint);
            if self.propagate(vertex, color) {
                self.enter(time_limit)?;
            }
        }
        Ok(())
    }

    /// Colors `vertex` and returns the trail checkpoint to rewind to.
    fn assign(&mut self, vertex: usize, color: usize) -> usize {
        let checkpoint = self.trail.checkpoint();
        self.state.commit(vertex, color);
        let top = self.running_max().max(color + 1);
        self.running.push(top);
        self.state.set_colors_in_use(top);
        checkpoint
    }

    /// Marks `color` on every uncolored neighbour of `vertex`. Returns `false`
    /// as soon as one of them has no color left below the incumbent.
    fn propagate(&mut self, vertex: usize, color: usize) -> bool {
        let graph = self.graph;
        let limit = self
            .best_count
            .saturating_sub(1)
            .min(self.state.saturation().width());

        for &u in graph.neighbors(vertex) {
            if self.state.is_colored(u) || self.state.saturation().is_forbidden(u, color) {
                continue;
            }
            self.trail.save(u, self.state.saturation());
            self.state.saturation_mut().mark(u, color);
            self.selector.update(u, graph, &self.state);
            if !self.state.saturation().has_admissible(u, limit) {
                self.stats.lookahead_cuts += 1;
                return false;
            }
        }
        true
    }

    /// Undoes [`ExactSearch::assign`]: rewinds the trail, uncolors `vertex`
    /// and drops its entry from the running maximum.
    fn unassign(&mut self, vertex: usize, checkpoint: usize) {
        while let Some(u) = self.trail.undo_one(checkpoint, self.state.saturation_mut()) {
            self.selector.update(u, self.graph, &self.state);
        }
        self.state.uncommit(vertex);
        self.running.pop();
        self.state.set_colors_in_use(self.running_max());
    }

    /// Hands a picked vertex back to the selector.
    fn unpick(&mut self, vertex: usize) {
        self.selector.push(vertex, self.graph, &self.state);
    }

    /// Restores every frame still on the stack, innermost first.
    fn unwind(&mut self) {
        while let Some(frame) = self.frames.pop() {
            if let Some(checkpoint) = frame.assigned {
                self.unassign(frame.vertex, checkpoint);
            }
            self.unpick(frame.vertex);
        }
    }
}

/// One level of the search: a vertex taken from the selector and the colors
/// it has tried.
#[derive(Clone, Copy, Debug)]
struct Frame {
    vertex: usize,
    /// Smallest color not yet tried.
    next_color: usize,
    /// Trail checkpoint of the color currently held by `vertex`.
    assigned: Option<usize>,
}

/// Restores the search state on drop, however the search exits.
struct Unwind<'a, 'g, S: CandidateSelector> {
    search: &'a mut ExactSearch<'g, S>,
}

impl<S: CandidateSelector> Drop for Unwind<'_, '_, S> {
    fn drop(&mut self) {
        self.search.unwind();
    }
}
