//! # Rank Permutation Solver
//!
//! Solves difference-constraint systems on connected graphs: given `n`
//! vertices and `m` directed edges `(u, v, w)`, each meaning
//! `rank[v] - rank[u] = w`, find an assignment of ranks forming a
//! permutation of `{1, ..., n}` that satisfies every constraint, or report
//! infeasibility.
//!
//! This crate provides:
//! - A constraint graph builder and a fast whole-input integer parser.
//! - A BFS potential propagator with early-exit contradiction detection,
//!   followed by shift normalization and permutation validation.
//! - An independent output checker and a strict input validator, mirroring
//!   the judge's acceptance contract.
//! - Instance generators for adversarial stress shapes.
//!
//! ## Quick Start
//!
//! ```
//! use rankperm::graph::parse_instance;
//! use rankperm::solve::{render_outcome, solve};
//!
//! let graph = parse_instance("3 2\n1 2 1\n2 3 1\n").unwrap();
//! let outcome = solve(&graph);
//! assert_eq!(render_outcome(&outcome), "1 2 3\n");
//! ```
//!
//! ## Infeasibility Is Not an Error
//!
//! ```
//! use rankperm::graph::parse_instance;
//! use rankperm::solve::{solve, Infeasible};
//!
//! // Weight 0 forces rank[1] == rank[2]: consistent, but not a permutation.
//! let graph = parse_instance("2 1\n1 2 0\n").unwrap();
//! assert_eq!(solve(&graph).unwrap_err(), Infeasible::NotPermutation);
//! ```
//!
//! ## Modules
//!
//! - [`graph`]: Constraint graph construction and input parsing.
//! - [`solve`]: Potential propagation, normalization, and parallel fan-out.
//! - [`check`]: Independent re-verification of candidate outputs.
//! - [`validate`]: Strict input validation (bounds + connectivity).
//! - [`cases`]: Edge-case corpus and random instance generators.
//!
//! ## Performance Notes
//!
//! - All potential arithmetic is `i64`: path sums reach `n * 10^9` at the
//!   stress limits (`n, m <= 2 * 10^5`).
//! - Propagation is a single linear-time traversal with fixed arrays, no
//!   per-node allocation.
//! - Independent instances in multi-instance inputs are solved in parallel
//!   via `rayon`, with outputs aggregated in input order.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::inline_always)] // Intentional for hot-path code
#![allow(clippy::missing_errors_doc)]

pub mod cases;
pub mod check;
pub mod graph;
pub mod solve;
pub mod validate;

/// Re-export commonly used types for convenience.
pub mod prelude {
    pub use crate::cases::GenKind;
    pub use crate::check::check_output;
    pub use crate::graph::{parse_instance, parse_instances, ConstraintGraph, Edge, InputError};
    pub use crate::solve::{render_outcome, solve, solve_all, Infeasible, Outcome};
    pub use crate::validate::validate_input;
}
