//! Instance generators for stress and edge-case testing.
//!
//! Two flavors: a fixed corpus of small hand-picked instances covering every
//! known trap (sign direction, self-loops, parallel edges, permutation gaps,
//! overflow weights), and parameterized random generators for large
//! adversarial shapes (chains, stars, random spanning trees with redundant
//! or planted-contradiction edges). Random generators take any `rand::Rng`,
//! so tests can drive them with a seeded RNG.

use crate::graph::Edge;
use rand::seq::SliceRandom;
use rand::Rng;
use std::fmt::Write as _;

// ============================================================================
// Rendering
// ============================================================================

/// Renders one instance in the input format: `n m` then one line per edge.
pub fn render_case(n: usize, edges: &[Edge]) -> String {
    let mut out = String::with_capacity(16 + edges.len() * 16);
    let _ = writeln!(out, "{n} {}", edges.len());
    for e in edges {
        let _ = writeln!(out, "{} {} {}", e.u, e.v, e.w);
    }
    out
}

fn edge(u: usize, v: usize, w: i64) -> Edge {
    Edge { u, v, w }
}

// ============================================================================
// Fixed edge-case corpus
// ============================================================================

/// The hand-picked corpus: `(name, input_text, feasible)` triples.
///
/// Every trap the solver must survive appears here at the smallest size that
/// exhibits it.
pub fn edge_case_corpus() -> Vec<(&'static str, String, bool)> {
    vec![
        (
            "minimal_feasible",
            render_case(2, &[edge(1, 2, 1)]),
            true,
        ),
        (
            "minimal_equal_ranks",
            render_case(2, &[edge(1, 2, 0)]),
            false,
        ),
        (
            "chain_consecutive",
            render_case(3, &[edge(1, 2, 1), edge(2, 3, 1)]),
            true,
        ),
        (
            "chain_range_too_wide",
            render_case(3, &[edge(1, 2, 2), edge(2, 3, 2)]),
            false,
        ),
        (
            "cycle_duplicate_ranks",
            render_case(3, &[edge(1, 2, 1), edge(2, 3, 0), edge(1, 3, 1)]),
            false,
        ),
        (
            "tree_with_gap",
            render_case(4, &[edge(1, 2, 1), edge(2, 3, 2), edge(3, 4, 1)]),
            false,
        ),
        (
            "inconsistent_cycle",
            render_case(
                4,
                &[edge(1, 2, 1), edge(2, 3, 1), edge(3, 1, -1), edge(3, 4, 1)],
            ),
            false,
        ),
        (
            "consistent_cycle",
            render_case(
                4,
                &[edge(1, 2, 1), edge(2, 3, 1), edge(3, 4, 1), edge(4, 1, -3)],
            ),
            true,
        ),
        (
            "negative_chain_reversed",
            render_case(
                5,
                &[edge(1, 2, -1), edge(2, 3, -1), edge(3, 4, -1), edge(4, 5, -1)],
            ),
            true,
        ),
        (
            "parallel_consistent",
            render_case(
                5,
                &[
                    edge(1, 2, 1),
                    edge(1, 2, 1),
                    edge(2, 3, 1),
                    edge(3, 4, 1),
                    edge(4, 5, 1),
                ],
            ),
            true,
        ),
        (
            "parallel_contradictory",
            render_case(
                5,
                &[
                    edge(1, 2, 1),
                    edge(1, 2, 2),
                    edge(2, 3, 1),
                    edge(3, 4, 1),
                    edge(4, 5, 1),
                ],
            ),
            false,
        ),
        (
            "nonzero_self_loop",
            render_case(
                4,
                &[edge(1, 1, 1), edge(1, 2, 1), edge(2, 3, 1), edge(3, 4, 1)],
            ),
            false,
        ),
        (
            "explicit_reverse_edge",
            render_case(
                4,
                &[edge(1, 2, 1), edge(2, 1, -1), edge(2, 3, 1), edge(3, 4, 1)],
            ),
            true,
        ),
        (
            "overflow_weights",
            render_case(
                6,
                &[
                    edge(1, 2, 1_000_000_000),
                    edge(2, 3, 1_000_000_000),
                    edge(3, 4, 1_000_000_000),
                    edge(4, 5, 1_000_000_000),
                    edge(5, 6, 1_000_000_000),
                ],
            ),
            false,
        ),
        (
            "chain_with_back_edges",
            render_case(
                6,
                &[
                    edge(1, 2, -1),
                    edge(2, 3, -1),
                    edge(3, 4, -1),
                    edge(4, 5, -1),
                    edge(5, 6, -1),
                    edge(1, 3, -2),
                    edge(2, 5, -3),
                    edge(6, 1, 5),
                ],
            ),
            true,
        ),
    ]
}

// ============================================================================
// Large deterministic shapes
// ============================================================================

/// A path `1 -> 2 -> ... -> n` with unit weights; feasible with ranks
/// `1..=n`. With `extra_edge` a redundant `1 -> n` closing edge is appended.
pub fn long_chain(n: usize, extra_edge: bool) -> String {
    let mut edges = Vec::with_capacity(n);
    for i in 1..n {
        edges.push(edge(i, i + 1, 1));
    }
    if extra_edge {
        edges.push(edge(1, n, n as i64 - 1));
    }
    render_case(n, &edges)
}

/// A path with weight `w` on every step. Consistent as equations but only a
/// permutation when `w` is `1` or `-1`; large `w` stresses 64-bit sums.
pub fn uniform_chain(n: usize, w: i64) -> String {
    let edges: Vec<Edge> = (1..n).map(|i| edge(i, i + 1, w)).collect();
    render_case(n, &edges)
}

/// A star centered at vertex 1 with `rank[i] = i`: `1 -> i` weighted `i - 1`.
pub fn star(n: usize) -> String {
    let edges: Vec<Edge> = (2..=n).map(|i| edge(1, i, i as i64 - 1)).collect();
    render_case(n, &edges)
}

// ============================================================================
// Random shapes
// ============================================================================

/// A random feasible instance: a hidden random permutation, a random
/// spanning tree consistent with it, and `extra` additional consistent
/// edges between random vertex pairs (parallel edges and self-loops with
/// `w = 0` can occur, both harmless).
pub fn random_feasible<R: Rng>(rng: &mut R, n: usize, extra: usize) -> String {
    let (ranks, mut edges) = random_consistent_edges(rng, n, extra);
    debug_assert_eq!(ranks.len(), n + 1);
    edges.shuffle(rng);
    render_case(n, &edges)
}

/// Like [`random_feasible`], but with one edge weight perturbed so the
/// instance contradicts itself.
pub fn random_contradiction<R: Rng>(rng: &mut R, n: usize, extra: usize) -> String {
    let (_, mut edges) = random_consistent_edges(rng, n, extra);
    let victim = rng.random_range(0..edges.len());
    let bump = if rng.random_bool(0.5) { 1 } else { -1 };
    edges[victim].w += bump;
    edges.shuffle(rng);
    render_case(n, &edges)
}

/// Hidden permutation plus consistent spanning tree and extra edges.
fn random_consistent_edges<R: Rng>(
    rng: &mut R,
    n: usize,
    extra: usize,
) -> (Vec<i64>, Vec<Edge>) {
    assert!(n >= 2, "need at least two vertices");

    // rank[v] for v in 1..=n, slot 0 unused
    let mut perm: Vec<i64> = (1..=n as i64).collect();
    perm.shuffle(rng);
    let mut ranks = vec![0i64; n + 1];
    ranks[1..].copy_from_slice(&perm);

    // Random spanning tree: attach each vertex to an earlier one.
    let mut edges = Vec::with_capacity(n - 1 + extra);
    for v in 2..=n {
        let u = rng.random_range(1..v);
        edges.push(edge(u, v, ranks[v] - ranks[u]));
    }
    for _ in 0..extra {
        let u = rng.random_range(1..=n);
        let v = rng.random_range(1..=n);
        edges.push(edge(u, v, ranks[v] - ranks[u]));
    }
    (ranks, edges)
}

// ============================================================================
// Named generators for the CLI
// ============================================================================

/// Generator shapes selectable by name from the command line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GenKind {
    /// Unit-weight path plus a redundant closing edge.
    Chain,
    /// Path with `10^9` weights (feasibility must fail on range).
    OverflowChain,
    /// Star centered at vertex 1.
    Star,
    /// Random feasible instance with redundant edges.
    RandomFeasible,
    /// Random instance with a planted contradiction.
    RandomContradiction,
}

impl GenKind {
    /// Looks a generator up by its CLI name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "chain" => Some(Self::Chain),
            "overflow-chain" => Some(Self::OverflowChain),
            "star" => Some(Self::Star),
            "random" => Some(Self::RandomFeasible),
            "contradiction" => Some(Self::RandomContradiction),
            _ => None,
        }
    }

    /// All CLI names, for usage text.
    pub fn names() -> &'static [&'static str] {
        &["chain", "overflow-chain", "star", "random", "contradiction"]
    }

    /// Produces one instance of this shape with `n` vertices.
    pub fn generate<R: Rng>(self, rng: &mut R, n: usize) -> String {
        match self {
            Self::Chain => long_chain(n, true),
            Self::OverflowChain => uniform_chain(n, 1_000_000_000),
            Self::Star => star(n),
            Self::RandomFeasible => random_feasible(rng, n, n / 2),
            Self::RandomContradiction => random_contradiction(rng, n, n / 2),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::check::check_output;
    use crate::graph::parse_instance;
    use crate::solve::{render_outcome, solve};
    use crate::validate::validate_input;
    use rand::SeedableRng;
    use rand_xorshift::XorShiftRng;

    // -------------------------------------------------------------------------
    // Corpus classification
    // -------------------------------------------------------------------------

    #[test]
    fn corpus_classifies_as_annotated() {
        for (name, input, feasible) in edge_case_corpus() {
            let outcome = solve(&parse_instance(&input).unwrap());
            assert_eq!(outcome.is_ok(), feasible, "case {name}");
        }
    }

    #[test]
    fn corpus_round_trips_through_checker() {
        for (name, input, _) in edge_case_corpus() {
            let outcome = solve(&parse_instance(&input).unwrap());
            let rendered = render_outcome(&outcome);
            check_output(&input, &rendered).unwrap_or_else(|e| panic!("case {name}: {e}"));
        }
    }

    #[test]
    fn corpus_cases_pass_the_input_validator() {
        for (name, input, _) in edge_case_corpus() {
            validate_input(&input).unwrap_or_else(|e| panic!("case {name}: {e}"));
        }
    }

    // -------------------------------------------------------------------------
    // Deterministic shapes
    // -------------------------------------------------------------------------

    #[test]
    fn long_chain_solves_to_identity() {
        let input = long_chain(1000, true);
        let ranks = solve(&parse_instance(&input).unwrap()).unwrap();
        let expected: Vec<i64> = (1..=1000).collect();
        assert_eq!(ranks, expected);
    }

    #[test]
    fn overflow_chain_is_infeasible_not_wrapped() {
        let input = uniform_chain(200, 1_000_000_000);
        assert!(solve(&parse_instance(&input).unwrap()).is_err());
    }

    #[test]
    fn equivalent_encodings_normalize_identically() {
        // A path and a star encode the same pairwise differences from
        // different anchors; normalization must erase the anchor choice.
        let a = solve(&parse_instance(&long_chain(300, false)).unwrap()).unwrap();
        let b = solve(&parse_instance(&star(300)).unwrap()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn star_solves_to_identity() {
        let input = star(500);
        let ranks = solve(&parse_instance(&input).unwrap()).unwrap();
        let expected: Vec<i64> = (1..=500).collect();
        assert_eq!(ranks, expected);
    }

    // -------------------------------------------------------------------------
    // Random shapes (seeded)
    // -------------------------------------------------------------------------

    #[test]
    fn random_feasible_instances_solve_and_verify() {
        let mut rng = XorShiftRng::seed_from_u64(0xC0FFEE);
        for _ in 0..50 {
            let n = rng.random_range(2..200);
            let input = random_feasible(&mut rng, n, n);
            let outcome = solve(&parse_instance(&input).unwrap());
            assert!(outcome.is_ok(), "generated feasible instance failed");
            check_output(&input, &render_outcome(&outcome)).unwrap();
        }
    }

    #[test]
    fn random_contradictions_are_infeasible() {
        let mut rng = XorShiftRng::seed_from_u64(0xBEEF);
        for _ in 0..50 {
            let n = rng.random_range(2..200);
            let input = random_contradiction(&mut rng, n, n);
            let outcome = solve(&parse_instance(&input).unwrap());
            assert!(outcome.is_err(), "planted contradiction went undetected");
        }
    }

    #[test]
    fn random_instances_pass_the_validator_when_dense_enough() {
        let mut rng = XorShiftRng::seed_from_u64(0xFACE);
        for _ in 0..20 {
            let n = rng.random_range(2..100);
            let input = random_feasible(&mut rng, n, n);
            validate_input(&input).unwrap();
        }
    }

    // -------------------------------------------------------------------------
    // CLI kinds
    // -------------------------------------------------------------------------

    #[test]
    fn gen_kind_names_round_trip() {
        for &name in GenKind::names() {
            assert!(GenKind::from_name(name).is_some(), "{name}");
        }
        assert_eq!(GenKind::from_name("bogus"), None);
    }

    #[test]
    fn every_kind_generates_parseable_input() {
        let mut rng = XorShiftRng::seed_from_u64(42);
        for &name in GenKind::names() {
            let kind = GenKind::from_name(name).unwrap();
            let input = kind.generate(&mut rng, 64);
            parse_instance(&input).unwrap_or_else(|e| panic!("{name}: {e}"));
        }
    }
}
