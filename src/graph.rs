//! Constraint graph construction and input parsing.
//!
//! An instance is a connected graph on `n` vertices with `m` directed edges
//! `(u, v, w)`, each encoding the difference constraint `rank[v] - rank[u] = w`.
//! The [`ConstraintGraph`] stores, per vertex, the `(neighbor, delta)` pairs
//! implied by all incident edges: each input edge contributes `(v, +w)` on
//! `u`'s list and `(u, -w)` on `v`'s list. Parallel and contradictory edges
//! are kept verbatim; the solver detects contradictions during propagation.

use std::fmt;

// ============================================================================
// Edge and ConstraintGraph
// ============================================================================

/// A directed difference constraint `rank[v] - rank[u] = w`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Edge {
    /// Source vertex, in `[1, n]`.
    pub u: usize,
    /// Target vertex, in `[1, n]`.
    pub v: usize,
    /// Required rank difference. `|w|` can reach `10^9`, so path sums need i64.
    pub w: i64,
}

/// One problem instance: vertex count, original edges, and the derived
/// per-vertex adjacency of `(neighbor, delta)` pairs.
///
/// Vertex ids are 1-based throughout; slot 0 of the adjacency is unused.
#[derive(Clone, Debug)]
pub struct ConstraintGraph {
    n: usize,
    edges: Vec<Edge>,
    adj: Vec<Vec<(usize, i64)>>,
}

impl ConstraintGraph {
    /// Builds the adjacency structure from an edge list.
    ///
    /// A self-loop contributes both `(u, w)` and `(u, -w)` to `u`'s list, so
    /// propagation checks it like any other edge (consistent iff `w == 0`).
    ///
    /// # Errors
    /// Returns an error if `n == 0` or any vertex id falls outside `[1, n]`.
    pub fn from_edges(n: usize, edges: Vec<Edge>) -> Result<Self, InputError> {
        if n == 0 {
            return Err(InputError::InvalidCount { what: "n", value: 0 });
        }
        let mut adj = vec![Vec::new(); n + 1];
        for (i, e) in edges.iter().enumerate() {
            if e.u < 1 || e.u > n {
                return Err(InputError::VertexOutOfRange {
                    edge: i + 1,
                    id: e.u as i64,
                    n,
                });
            }
            if e.v < 1 || e.v > n {
                return Err(InputError::VertexOutOfRange {
                    edge: i + 1,
                    id: e.v as i64,
                    n,
                });
            }
            adj[e.u].push((e.v, e.w));
            adj[e.v].push((e.u, -e.w));
        }
        Ok(Self { n, edges, adj })
    }

    /// Number of vertices.
    #[inline(always)]
    pub fn vertex_count(&self) -> usize {
        self.n
    }

    /// Number of original directed edges.
    #[inline(always)]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// The original edge list, in input order.
    #[inline(always)]
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Constraint pairs `(neighbor, delta)` incident to vertex `u`, meaning
    /// `potential[neighbor] = potential[u] + delta`.
    #[inline(always)]
    pub fn neighbors(&self, u: usize) -> &[(usize, i64)] {
        debug_assert!(u >= 1 && u <= self.n);
        &self.adj[u]
    }
}

// ============================================================================
// Errors
// ============================================================================

/// Errors for malformed instance input.
///
/// These are program-level failures, distinct from algorithmic infeasibility
/// (which is a normal outcome reported as `-1`).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InputError {
    /// The input contained no tokens.
    Empty,
    /// A byte that is not a digit, `-`, or whitespace.
    InvalidByte {
        /// Byte offset in the input.
        offset: usize,
        /// The offending byte.
        byte: u8,
    },
    /// A `-` sign not followed by a digit.
    DanglingSign {
        /// Byte offset of the sign.
        offset: usize,
    },
    /// The token stream ended before the expected field.
    UnexpectedEnd {
        /// What was being read when the stream ran out.
        expected: &'static str,
    },
    /// Tokens remained after the instance(s) were fully read.
    TrailingTokens {
        /// Number of unconsumed tokens.
        count: usize,
    },
    /// A count field (`n`, `m`, or `T`) was outside its valid range.
    InvalidCount {
        /// Which field.
        what: &'static str,
        /// The parsed value.
        value: i64,
    },
    /// An edge endpoint outside `[1, n]`.
    VertexOutOfRange {
        /// 1-based edge index.
        edge: usize,
        /// The offending vertex id.
        id: i64,
        /// The instance's vertex count.
        n: usize,
    },
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputError::Empty => write!(f, "input is empty"),
            InputError::InvalidByte { offset, byte } => write!(
                f,
                "invalid byte {:?} at offset {offset} (expected digits, '-', or whitespace)",
                *byte as char
            ),
            InputError::DanglingSign { offset } => {
                write!(f, "'-' at offset {offset} is not followed by a digit")
            }
            InputError::UnexpectedEnd { expected } => {
                write!(f, "input ended early while reading {expected}")
            }
            InputError::TrailingTokens { count } => {
                write!(f, "{count} extra tokens after the last instance")
            }
            InputError::InvalidCount { what, value } => {
                write!(f, "invalid value for {what}: {value}")
            }
            InputError::VertexOutOfRange { edge, id, n } => {
                write!(f, "edge {edge} has vertex {id} outside [1, {n}]")
            }
        }
    }
}

impl std::error::Error for InputError {}

// ============================================================================
// Parsing
// ============================================================================

/// Scans the whole input and returns every integer in order.
///
/// Single pass over the bytes, accumulating sign and digits; whitespace
/// terminates the current number. Values accumulate in `i64`, which is wide
/// enough for every field this format carries.
///
/// # Errors
/// Returns an error on bytes other than digits, `-`, and whitespace, or on a
/// `-` with no following digit.
pub fn scan_integers(input: &[u8]) -> Result<Vec<i64>, InputError> {
    let mut numbers = Vec::new();
    let mut value: i64 = 0;
    let mut negative = false;
    let mut in_number = false;
    let mut sign_at: Option<usize> = None;

    for (offset, &b) in input.iter().enumerate() {
        match b {
            b'0'..=b'9' => {
                value = value * 10 + i64::from(b - b'0');
                in_number = true;
            }
            b'-' => {
                if in_number || sign_at.is_some() {
                    return Err(InputError::DanglingSign {
                        offset: sign_at.unwrap_or(offset),
                    });
                }
                negative = true;
                sign_at = Some(offset);
            }
            b' ' | b'\n' | b'\r' | b'\t' => {
                if sign_at.is_some() && !in_number {
                    return Err(InputError::DanglingSign {
                        offset: sign_at.unwrap_or(offset),
                    });
                }
                if in_number {
                    numbers.push(if negative { -value } else { value });
                    value = 0;
                    negative = false;
                    in_number = false;
                    sign_at = None;
                }
            }
            _ => return Err(InputError::InvalidByte { offset, byte: b }),
        }
    }
    if sign_at.is_some() && !in_number {
        return Err(InputError::DanglingSign {
            offset: sign_at.unwrap_or(0),
        });
    }
    if in_number {
        numbers.push(if negative { -value } else { value });
    }
    Ok(numbers)
}

/// Parses a single instance (`n m` then `m` edge triples) from text.
///
/// The token count must be exactly `2 + 3m`.
///
/// # Errors
/// Returns an error on malformed tokens, short or trailing input, or
/// out-of-range vertex ids.
pub fn parse_instance(input: &str) -> Result<ConstraintGraph, InputError> {
    let tokens = scan_integers(input.as_bytes())?;
    if tokens.is_empty() {
        return Err(InputError::Empty);
    }
    let mut pos = 0;
    let graph = take_instance(&tokens, &mut pos)?;
    if pos != tokens.len() {
        return Err(InputError::TrailingTokens {
            count: tokens.len() - pos,
        });
    }
    Ok(graph)
}

/// Parses the multi-instance variant: a leading count `T` followed by `T`
/// instances in the single-instance shape, concatenated.
///
/// # Errors
/// Returns an error on malformed tokens, a bad `T`, short or trailing input,
/// or out-of-range vertex ids in any instance.
pub fn parse_instances(input: &str) -> Result<Vec<ConstraintGraph>, InputError> {
    let tokens = scan_integers(input.as_bytes())?;
    if tokens.is_empty() {
        return Err(InputError::Empty);
    }
    let t = tokens[0];
    if t < 1 {
        return Err(InputError::InvalidCount { what: "T", value: t });
    }
    let mut pos = 1;
    let mut graphs = Vec::with_capacity(t as usize);
    for _ in 0..t {
        graphs.push(take_instance(&tokens, &mut pos)?);
    }
    if pos != tokens.len() {
        return Err(InputError::TrailingTokens {
            count: tokens.len() - pos,
        });
    }
    Ok(graphs)
}

/// Consumes one `n m (u v w)*m` block from the token stream.
fn take_instance(tokens: &[i64], pos: &mut usize) -> Result<ConstraintGraph, InputError> {
    let n = take(tokens, pos, "n")?;
    let m = take(tokens, pos, "m")?;
    if n < 1 {
        return Err(InputError::InvalidCount { what: "n", value: n });
    }
    if m < 0 {
        return Err(InputError::InvalidCount { what: "m", value: m });
    }
    let n = n as usize;
    let m = m as usize;
    let mut edges = Vec::with_capacity(m);
    for i in 1..=m {
        let u = take(tokens, pos, "edge u")?;
        let v = take(tokens, pos, "edge v")?;
        let w = take(tokens, pos, "edge w")?;
        if u < 1 || u > n as i64 {
            return Err(InputError::VertexOutOfRange { edge: i, id: u, n });
        }
        if v < 1 || v > n as i64 {
            return Err(InputError::VertexOutOfRange { edge: i, id: v, n });
        }
        edges.push(Edge {
            u: u as usize,
            v: v as usize,
            w,
        });
    }
    ConstraintGraph::from_edges(n, edges)
}

#[inline]
fn take(tokens: &[i64], pos: &mut usize, expected: &'static str) -> Result<i64, InputError> {
    let value = *tokens
        .get(*pos)
        .ok_or(InputError::UnexpectedEnd { expected })?;
    *pos += 1;
    Ok(value)
}

// ============================================================================
// Tests
// ============================================================================
