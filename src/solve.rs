//! Potential propagation and permutation normalization.
//!
//! The solve pipeline runs in strict order over a [`ConstraintGraph`]:
//! 1. BFS from vertex 1, assigning each reachable vertex a relative
//!    potential consistent with every traversed `(neighbor, delta)` pair and
//!    bailing out on the first mismatch against an already-assigned value.
//! 2. A connectivity post-check: any unvisited vertex makes the instance
//!    infeasible.
//! 3. A shift so the minimum potential becomes 1, then a range check
//!    (`max == n`) plus a seen-marker distinctness check. Both are needed:
//!    range alone admits duplicates with gaps elsewhere, distinctness alone
//!    admits values outside `[1, n]`.
//!
//! All arithmetic is `i64`: potentials along a path can reach `n * 10^9`,
//! about `2 * 10^14` at the stress limits.

use crate::graph::ConstraintGraph;
use rayon::prelude::*;
use std::collections::VecDeque;
use std::fmt;

// ============================================================================
// Infeasibility
// ============================================================================

/// Why an instance has no valid rank permutation.
///
/// This is a normal outcome, not an error: the driver reports it as `-1`.
/// The three variants are genuinely independent failure modes; which vertex
/// a `Contradiction` names depends on traversal order and is not part of the
/// contract.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Infeasible {
    /// A vertex was reached with a potential disagreeing with its assigned one.
    Contradiction {
        /// The vertex whose constraint could not be satisfied.
        vertex: usize,
    },
    /// A vertex is unreachable from vertex 1 in the undirected view.
    Disconnected {
        /// The first unvisited vertex found.
        vertex: usize,
    },
    /// Potentials are consistent but do not shift to a permutation of `[1, n]`.
    NotPermutation,
}

impl fmt::Display for Infeasible {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Infeasible::Contradiction { vertex } => {
                write!(f, "contradictory constraints at vertex {vertex}")
            }
            Infeasible::Disconnected { vertex } => {
                write!(f, "vertex {vertex} is unreachable from vertex 1")
            }
            Infeasible::NotPermutation => {
                write!(f, "potentials do not form a permutation of [1, n]")
            }
        }
    }
}

impl std::error::Error for Infeasible {}

/// Per-instance outcome: ranks for vertices `1..=n` in vertex order, or the
/// reason no assignment exists.
pub type Outcome = Result<Vec<i64>, Infeasible>;

// ============================================================================
// Solving
// ============================================================================

/// Solves one instance: propagate potentials, then normalize to a permutation.
///
/// # Errors
/// Returns the [`Infeasible`] reason when no valid rank permutation exists.
pub fn solve(graph: &ConstraintGraph) -> Outcome {
    let potentials = propagate(graph)?;
    normalize(graph.vertex_count(), potentials)
}

/// Solves independent instances in parallel, preserving input order.
///
/// Instances share no state, so this is a plain fan-out; `rayon` collects
/// the outcomes back in order.
pub fn solve_all(graphs: &[ConstraintGraph]) -> Vec<Outcome> {
    graphs.par_iter().map(solve).collect()
}

/// BFS potential propagation from vertex 1.
///
/// Assigns `potential[1] = 0` and walks the adjacency: an unvisited neighbor
/// gets `potential[u] + delta` and is enqueued; a visited one is compared
/// against that value, and any mismatch ends the whole solve immediately.
/// Every edge is inspected from both endpoints, so non-tree edges are
/// checked too. After the queue drains, any unvisited vertex means the
/// undirected graph is disconnected, which is infeasible by itself.
///
/// Returns potentials for vertices `1..=n` (slot 0 unused).
fn propagate(graph: &ConstraintGraph) -> Result<Vec<i64>, Infeasible> {
    let n = graph.vertex_count();
    // Arena-style state: a visited flag array plus a parallel value array,
    // indexed by vertex id. Each vertex's potential is written exactly once.
    let mut potential = vec![0i64; n + 1];
    let mut visited = vec![false; n + 1];
    let mut queue = VecDeque::with_capacity(n);

    visited[1] = true;
    queue.push_back(1usize);

    while let Some(u) = queue.pop_front() {
        let base = potential[u];
        for &(v, delta) in graph.neighbors(u) {
            let expected = base + delta;
            if !visited[v] {
                visited[v] = true;
                potential[v] = expected;
                queue.push_back(v);
            } else if potential[v] != expected {
                return Err(Infeasible::Contradiction { vertex: v });
            }
        }
    }

    if let Some(vertex) = (1..=n).find(|&v| !visited[v]) {
        return Err(Infeasible::Disconnected { vertex });
    }

    Ok(potential)
}

/// Shifts potentials so the minimum is 1 and validates the permutation.
fn normalize(n: usize, potential: Vec<i64>) -> Outcome {
    debug_assert_eq!(potential.len(), n + 1);

    let mut min = i64::MAX;
    let mut max = i64::MIN;
    for &p in &potential[1..] {
        min = min.min(p);
        max = max.max(p);
    }

    // With the minimum pinned at 1 by the shift, max == n iff the spread is
    // exactly n - 1. The subtraction cannot overflow: both extremes came
    // from one BFS tree of at most 2 * 10^5 edges of weight at most 10^9.
    if max - min != n as i64 - 1 {
        return Err(Infeasible::NotPermutation);
    }

    let shift = 1 - min;
    let mut seen = vec![false; n + 1];
    let mut ranks = Vec::with_capacity(n);
    for &p in &potential[1..] {
        let rank = p + shift;
        debug_assert!((1..=n as i64).contains(&rank));
        if seen[rank as usize] {
            return Err(Infeasible::NotPermutation);
        }
        seen[rank as usize] = true;
        ranks.push(rank);
    }

    Ok(ranks)
}

// ============================================================================
// Output rendering
// ============================================================================

/// Renders one outcome in the judge format: the ranks space-separated, or
/// `-1`, with a single trailing newline either way.
pub fn render_outcome(outcome: &Outcome) -> String {
    match outcome {
        Ok(ranks) => {
            let mut line = String::with_capacity(ranks.len() * 7 + 1);
            for (i, r) in ranks.iter().enumerate() {
                if i > 0 {
                    line.push(' ');
                }
                line.push_str(&r.to_string());
            }
            line.push('\n');
            line
        }
        Err(_) => "-1\n".to_string(),
    }
}

// ============================================================================
// Tests
// ============================================================================
