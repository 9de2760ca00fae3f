//! Algorithm selection and the top-level solve entry point.

use super::deadline::Deadline;
use super::exact::ExactSearch;
use super::heuristic::dsatur_with_limit;
use super::outcome::{Coloring, Outcome};
use super::selector::{
    BinaryHeapSelector, CandidateSelector, DenseSelector, FibonacciHeapSelector, PassSelector, SewellSelector,
};
use crate::error::Error;
use crate::graph::{connected_components, induced_subgraph, Graph};
use core::fmt;
use core::str::FromStr;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info};

/// The coloring algorithms a caller can ask for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Algorithm {
    /// Heuristic, linear-scan selector.
    Dsatur,
    /// Heuristic, binary-heap selector.
    DsaturBinaryHeap,
    /// Heuristic, Fibonacci-heap selector.
    DsaturFibonacciHeap,
    /// Heuristic, Sewell tie-breaking.
    DsaturSewell,
    /// Heuristic, Pass tie-breaking.
    DsaturPass,
    /// Exact search, linear-scan selector.
    BnbDsatur,
    /// Exact search, Sewell tie-breaking.
    BnbDsaturSewell,
    /// Exact search, Pass tie-breaking.
    BnbDsaturPass,
}

impl Algorithm {
    /// Every algorithm, heuristics first.
    pub const ALL: [Algorithm; 8] = [
        Algorithm::Dsatur,
        Algorithm::DsaturBinaryHeap,
        Algorithm::DsaturFibonacciHeap,
        Algorithm::DsaturSewell,
        Algorithm::DsaturPass,
        Algorithm::BnbDsatur,
        Algorithm::BnbDsaturSewell,
        Algorithm::BnbDsaturPass,
    ];

    /// Canonical upper-case name.
    pub const fn name(self) -> &'static str {
        match self {
            Algorithm::Dsatur => "DSATUR",
            Algorithm::DsaturBinaryHeap => "DSATUR_BINARY_HEAP",
            Algorithm::DsaturFibonacciHeap => "DSATUR_FIBONACCI_HEAP",
            Algorithm::DsaturSewell => "DSATUR_SEWELL",
            Algorithm::DsaturPass => "DSATUR_PASS",
            Algorithm::BnbDsatur => "BNB_DSATUR",
            Algorithm::BnbDsaturSewell => "BNB_DSATUR_SEWELL",
            Algorithm::BnbDsaturPass => "BNB_DSATUR_PASS",
        }
    }

    /// Returns `true` for the branch-and-bound variants.
    pub const fn is_exact(self) -> bool {
        matches!(
            self,
            Algorithm::BnbDsatur | Algorithm::BnbDsaturSewell | Algorithm::BnbDsaturPass
        )
    }

    /// A fresh selector of the kind this algorithm uses.
    pub fn selector(self) -> Box<dyn CandidateSelector> {
        match self {
            Algorithm::Dsatur | Algorithm::BnbDsatur => Box::new(DenseSelector::new()),
            Algorithm::DsaturBinaryHeap => Box::new(BinaryHeapSelector::new()),
            Algorithm::DsaturFibonacciHeap => Box::new(FibonacciHeapSelector::new()),
            Algorithm::DsaturSewell | Algorithm::BnbDsaturSewell => Box::new(SewellSelector::new()),
            Algorithm::DsaturPass | Algorithm::BnbDsaturPass => Box::new(PassSelector::new()),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = Error;

    /// Case-insensitive; `-` and `_` are interchangeable.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_uppercase().replace('-', "_");
        Algorithm::ALL
            .into_iter()
            .find(|a| a.name() == wanted)
            .ok_or_else(|| Error::UnknownAlgorithm(s.to_owned()))
    }
}

/// Knobs for [`solve`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SolveOptions {
    /// Wall-clock budget; `None` runs to completion.
    pub time_limit: Option<Duration>,
    /// Run the linear-scan heuristic first and use its result as the
    /// initial incumbent of an exact search.
    pub seed_incumbent: bool,
}

impl Default for SolveOptions {
    fn default() -> Self {
        Self {
            time_limit: None,
            seed_incumbent: true,
        }
    }
}

impl SolveOptions {
    /// Sets the time limit.
    #[must_use]
    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }
}

/// Colors `graph` with `algorithm`.
pub fn solve(graph: &Graph, algorithm: Algorithm, options: &SolveOptions) -> Outcome {
    let deadline = Deadline::new(options.time_limit);
    let outcome = solve_until(graph, algorithm, options, &deadline);
    info!(
        algorithm = %algorithm,
        vertices = graph.vertex_count(),
        edges = graph.edge_count(),
        colors = outcome.color_count(),
        timed_out = outcome.is_timed_out(),
        elapsed_ms = deadline.elapsed().as_millis() as u64,
        "solve finished"
    );
    outcome
}

/// Colors every connected component on its own and merges the results.
///
/// The components share one time budget. Exact search profits most: a
/// component's bound is no longer dragged along by the others. On time-out
/// the incumbent is reported only if every component has one.
pub fn solve_by_components(graph: &Graph, algorithm: Algorithm, options: &SolveOptions) -> Outcome {
    let deadline = Deadline::new(options.time_limit);
    let components = connected_components(graph);
    debug!(components = components.len(), "solving components separately");

    let mut colors = vec![0; graph.vertex_count()];
    let mut complete = true;
    let mut has_incumbent = true;
    for component in &components {
        let subgraph = induced_subgraph(graph, component);
        let outcome = solve_until(&subgraph, algorithm, options, &deadline);
        let coloring = match outcome {
            Outcome::Colored(coloring) => Some(coloring),
            Outcome::TimedOut { incumbent } => {
                complete = false;
                incumbent
            }
        };
        match coloring {
            Some(coloring) => {
                for (&v, c) in component.iter().zip(coloring.into_colors()) {
                    colors[v] = c;
                }
            }
            None => has_incumbent = false,
        }
        if !has_incumbent {
            break;
        }
    }

    let outcome = match (complete, has_incumbent) {
        (true, _) => Outcome::Colored(Coloring::new(colors)),
        (false, true) => Outcome::TimedOut {
            incumbent: Some(Coloring::new(colors)),
        },
        (false, false) => Outcome::TimedOut { incumbent: None },
    };
    info!(
        algorithm = %algorithm,
        components = components.len(),
        colors = outcome.color_count(),
        timed_out = outcome.is_timed_out(),
        elapsed_ms = deadline.elapsed().as_millis() as u64,
        "component solve finished"
    );
    outcome
}

fn solve_until(graph: &Graph, algorithm: Algorithm, options: &SolveOptions, deadline: &Deadline) -> Outcome {
    if !algorithm.is_exact() {
        return dsatur_with_limit(graph, algorithm.selector(), deadline.as_predicate());
    }
    let mut search = ExactSearch::new(graph, algorithm.selector());
    if options.seed_incumbent {
        match dsatur_with_limit(graph, DenseSelector::new(), deadline.as_predicate()) {
            Outcome::Colored(seed) => search = search.with_incumbent(seed),
            timed_out @ Outcome::TimedOut { .. } => return timed_out,
        }
    }
    search.run(deadline.as_predicate())
}
