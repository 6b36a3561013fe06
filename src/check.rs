//! Independent re-verification of solver output against an input.
//!
//! The checker never solves anything. Given the input text and a candidate
//! output text it confirms that every non-`-1` answer is a permutation of
//! `[1, n]` satisfying each edge's `rank[v] - rank[u] = w`, under a strict
//! whitespace discipline: single spaces between tokens, no blank lines, no
//! carriage returns, at most one trailing newline. A syntactically
//! well-formed `-1` is accepted as-is, since proving infeasibility would
//! amount to re-solving.

use crate::graph::{parse_instance, parse_instances, ConstraintGraph};

// ============================================================================
// Public API
// ============================================================================

/// Checks a candidate output against an input.
///
/// The input may be a single instance or the `T`-prefixed multi-instance
/// form; the single shape is tried first.
///
/// # Errors
/// Returns a human-readable reason on the first violation found.
pub fn check_output(input_text: &str, output_text: &str) -> Result<(), String> {
    let graphs = parse_input_cases(input_text)?;
    let tokens = tokenize_output_strict(output_text)?;

    let mut ptr = 0;
    for (case, graph) in graphs.iter().enumerate() {
        let case = case + 1;
        let n = graph.vertex_count();
        if ptr >= tokens.len() {
            return Err(format!(
                "case {case}: output ended early; expected '-1' or {n} integers"
            ));
        }

        if tokens[ptr] == "-1" {
            // Cannot verify unsatisfiability without solving; accept the token.
            ptr += 1;
            continue;
        }

        if ptr + n > tokens.len() {
            return Err(format!(
                "case {case}: expected {n} integers, but only {} tokens remain",
                tokens.len() - ptr
            ));
        }

        let ranks = read_permutation(&tokens[ptr..ptr + n], case, n)?;
        verify_constraints(graph, &ranks, case)?;
        ptr += n;
    }

    if ptr != tokens.len() {
        return Err(format!(
            "extra output tokens: expected end of output after {ptr} tokens, got {} extra",
            tokens.len() - ptr
        ));
    }
    Ok(())
}

// ============================================================================
// Internal
// ============================================================================

fn parse_input_cases(input_text: &str) -> Result<Vec<ConstraintGraph>, String> {
    // Prefer the single-instance shape exactly matching the statement, then
    // fall back to the T-prefixed multi-instance variant.
    let single_err = match parse_instance(input_text) {
        Ok(g) => return Ok(vec![g]),
        Err(e) => e,
    };
    match parse_instances(input_text) {
        Ok(gs) => Ok(gs),
        Err(multi_err) => Err(format!(
            "input parsing failed: {single_err}; also failed as multi-instance: {multi_err}"
        )),
    }
}

/// Splits the output into tokens under the strict format rules.
fn tokenize_output_strict(output_text: &str) -> Result<Vec<&str>, String> {
    if output_text.contains('\r') {
        return Err("output contains carriage returns; only \\n newlines are allowed".to_string());
    }

    let core = match output_text.strip_suffix('\n') {
        Some(rest) if rest.ends_with('\n') => {
            return Err("output has more than one trailing newline".to_string());
        }
        Some(rest) => rest,
        None => output_text,
    };

    if core.is_empty() {
        return Err("output is empty".to_string());
    }
    if core.starts_with(char::is_whitespace) || core.ends_with(char::is_whitespace) {
        return Err(
            "output has leading/trailing whitespace; only a single trailing newline is allowed"
                .to_string(),
        );
    }
    if let Some(ch) = core
        .chars()
        .find(|c| !matches!(c, '0'..='9' | '-' | ' ' | '\n'))
    {
        return Err(format!(
            "output contains invalid character {ch:?}; only digits, '-', spaces, and newlines are allowed"
        ));
    }

    let mut tokens = Vec::new();
    for (i, line) in core.split('\n').enumerate() {
        let lineno = i + 1;
        if line.is_empty() {
            return Err(format!("output contains an empty line at line {lineno}"));
        }
        if line.starts_with(' ') || line.ends_with(' ') {
            return Err(format!("line {lineno} has leading/trailing spaces"));
        }
        if line.contains("  ") {
            return Err(format!("line {lineno} contains consecutive spaces"));
        }
        tokens.extend(line.split(' '));
    }
    Ok(tokens)
}

/// Strict integer token: optional leading `-`, then only digits.
fn is_strict_int(tok: &str) -> bool {
    let digits = tok.strip_prefix('-').unwrap_or(tok);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

fn read_permutation(tokens: &[&str], case: usize, n: usize) -> Result<Vec<i64>, String> {
    let mut seen = vec![false; n + 1];
    let mut ranks = Vec::with_capacity(n);
    for (i, tok) in tokens.iter().enumerate() {
        if !is_strict_int(tok) {
            return Err(format!(
                "case {case}: invalid integer token for rank[{}]: {tok:?}",
                i + 1
            ));
        }
        let val: i64 = tok.parse().map_err(|_| {
            format!("case {case}: rank[{}]={tok} does not fit in 64 bits", i + 1)
        })?;
        if val < 1 || val > n as i64 {
            return Err(format!(
                "case {case}: rank[{}]={val} is out of range [1..{n}]",
                i + 1
            ));
        }
        if seen[val as usize] {
            return Err(format!(
                "case {case}: ranks are not distinct: value {val} appears more than once"
            ));
        }
        seen[val as usize] = true;
        ranks.push(val);
    }
    Ok(ranks)
}

fn verify_constraints(graph: &ConstraintGraph, ranks: &[i64], case: usize) -> Result<(), String> {
    for (i, e) in graph.edges().iter().enumerate() {
        let lhs = ranks[e.v - 1] - ranks[e.u - 1];
        if lhs != e.w {
            return Err(format!(
                "case {case}: constraint violation on edge {}: rank[{}] - rank[{}] = {} - {} = {lhs}, expected {}",
                i + 1,
                e.v,
                e.u,
                ranks[e.v - 1],
                ranks[e.u - 1],
                e.w
            ));
        }
    }
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================
