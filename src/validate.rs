//! Strict validation of candidate inputs before they reach the solver.
//!
//! An input is legal when every line is a strict integer line (no blank
//! lines, tabs, or stray spaces), every instance satisfies
//! `2 <= n <= 2*10^5`, `n-1 <= m <= 2*10^5`, vertex ids lie in `[1, n]`,
//! weights lie in `[-10^9, 10^9]`, and the undirected edge set connects all
//! `n` vertices. Connectivity is checked with a union-find; self-loops are
//! allowed but do not count toward it.
//!
//! Two layouts are accepted: one or more instances concatenated (each
//! starting with an `n m` line), or a leading count line `T` followed by `T`
//! instances.

/// Upper bound on `n`.
pub const MAX_VERTICES: i64 = 200_000;
/// Upper bound on `m`.
pub const MAX_EDGES: i64 = 200_000;
/// Bound on `|w|`.
pub const MAX_WEIGHT: i64 = 1_000_000_000;

// ============================================================================
// Public API
// ============================================================================

/// Validates an input text against the full instance constraints.
///
/// # Errors
/// Returns a human-readable reason on the first violation found.
pub fn validate_input(text: &str) -> Result<(), String> {
    if text.is_empty() {
        return Err("input is empty".to_string());
    }

    let lines: Vec<&str> = text.split('\n').collect();
    // A trailing newline yields one final empty element; anything else empty
    // is a blank line and is rejected below.
    let lines = match lines.split_last() {
        Some((last, rest)) if last.is_empty() => rest,
        _ => &lines[..],
    };

    for (i, line) in lines.iter().enumerate() {
        check_strict_int_line(line).map_err(|e| format!("line {}: {e}", i + 1))?;
    }
    if lines.is_empty() {
        return Err("input is empty".to_string());
    }

    let first_fields = lines[0].split(' ').count();
    match first_fields {
        1 => validate_with_count(lines),
        2 => validate_concatenated(lines),
        _ => Err(format!(
            "first line has {first_fields} fields; expected 'T' or 'n m'"
        )),
    }
}

// ============================================================================
// Line shape
// ============================================================================

/// A strict integer line: non-empty, no tabs, no leading/trailing space,
/// single spaces between tokens, every token an integer.
fn check_strict_int_line(line: &str) -> Result<(), String> {
    if line.is_empty() {
        return Err("blank line".to_string());
    }
    if line.contains('\t') {
        return Err("contains a tab".to_string());
    }
    if line.starts_with(' ') || line.ends_with(' ') || line.contains("  ") {
        return Err("stray spaces".to_string());
    }
    for tok in line.split(' ') {
        let digits = tok.strip_prefix('-').unwrap_or(tok);
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(format!("non-integer token {tok:?}"));
        }
    }
    Ok(())
}

fn parse_line_ints(line: &str) -> Result<Vec<i64>, String> {
    line.split(' ')
        .map(|tok| {
            tok.parse::<i64>()
                .map_err(|_| format!("token {tok:?} does not fit in 64 bits"))
        })
        .collect()
}

// ============================================================================
// Instance structure
// ============================================================================

fn validate_with_count(lines: &[&str]) -> Result<(), String> {
    let head = parse_line_ints(lines[0])?;
    let t = head[0];
    if t < 1 {
        return Err(format!("T must be >= 1, got {t}"));
    }
    let mut idx = 1;
    for case in 1..=t {
        idx = validate_one_case(lines, idx).map_err(|e| format!("case {case}: {e}"))?;
    }
    if idx != lines.len() {
        return Err(format!(
            "{} extra lines after the last of {t} cases",
            lines.len() - idx
        ));
    }
    Ok(())
}

fn validate_concatenated(lines: &[&str]) -> Result<(), String> {
    let mut idx = 0;
    let mut case = 0;
    while idx < lines.len() {
        case += 1;
        idx = validate_one_case(lines, idx).map_err(|e| format!("case {case}: {e}"))?;
    }
    Ok(())
}

/// Validates one `n m` block starting at `lines[idx]`; returns the index
/// just past it.
fn validate_one_case(lines: &[&str], idx: usize) -> Result<usize, String> {
    let header = lines
        .get(idx)
        .ok_or_else(|| "expected 'n m' header but input ended".to_string())?;
    let fields = parse_line_ints(header)?;
    if fields.len() != 2 {
        return Err(format!(
            "header has {} fields; expected 'n m'",
            fields.len()
        ));
    }
    let (n, m) = (fields[0], fields[1]);
    if n < 2 || n > MAX_VERTICES {
        return Err(format!("n={n} outside [2, {MAX_VERTICES}]"));
    }
    if m < n - 1 || m > MAX_EDGES {
        return Err(format!("m={m} outside [n-1, {MAX_EDGES}] for n={n}"));
    }
    let n = n as usize;
    let m = m as usize;
    if idx + 1 + m > lines.len() {
        return Err(format!(
            "expected {m} edge lines but only {} remain",
            lines.len() - idx - 1
        ));
    }

    let mut dsu = Dsu::new(n);
    for j in 1..=m {
        let fields = parse_line_ints(lines[idx + j])?;
        if fields.len() != 3 {
            return Err(format!(
                "edge {j} has {} fields; expected 'u v w'",
                fields.len()
            ));
        }
        let (u, v, w) = (fields[0], fields[1], fields[2]);
        if u < 1 || u > n as i64 || v < 1 || v > n as i64 {
            return Err(format!("edge {j}: vertex out of range: u={u}, v={v}, n={n}"));
        }
        if w.abs() > MAX_WEIGHT {
            return Err(format!("edge {j}: weight {w} outside [-{MAX_WEIGHT}, {MAX_WEIGHT}]"));
        }
        // Connectivity is over the undirected view; self-loops don't help.
        if u != v {
            dsu.union(u as usize - 1, v as usize - 1);
        }
    }

    if dsu.components() != 1 {
        return Err(format!(
            "undirected graph is not connected ({} components)",
            dsu.components()
        ));
    }
    Ok(idx + 1 + m)
}

// ============================================================================
// Union-find
// ============================================================================

/// Union-find with path halving and union by size.
struct Dsu {
    parent: Vec<usize>,
    size: Vec<usize>,
    components: usize,
}

impl Dsu {
    fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
            size: vec![1; n],
            components: n,
        }
    }

    fn find(&mut self, mut a: usize) -> usize {
        while self.parent[a] != a {
            self.parent[a] = self.parent[self.parent[a]];
            a = self.parent[a];
        }
        a
    }

    fn union(&mut self, a: usize, b: usize) {
        let mut ra = self.find(a);
        let mut rb = self.find(b);
        if ra == rb {
            return;
        }
        if self.size[ra] < self.size[rb] {
            std::mem::swap(&mut ra, &mut rb);
        }
        self.parent[rb] = ra;
        self.size[ra] += self.size[rb];
        self.components -= 1;
    }

    fn components(&self) -> usize {
        self.components
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Accepting legal inputs
    // -------------------------------------------------------------------------

    #[test]
    fn accepts_minimal_instance() {
        validate_input("2 1\n1 2 1\n").unwrap();
    }

    #[test]
    fn accepts_instance_without_trailing_newline() {
        validate_input("2 1\n1 2 1").unwrap();
    }

    #[test]
    fn accepts_t_prefixed_instances() {
        validate_input("2\n2 1\n1 2 1\n3 2\n1 2 1\n2 3 1\n").unwrap();
    }

    #[test]
    fn accepts_concatenated_instances() {
        validate_input("2 1\n1 2 1\n3 2\n1 2 1\n2 3 1\n").unwrap();
    }

    #[test]
    fn accepts_self_loops_when_otherwise_connected() {
        validate_input("2 2\n1 2 1\n1 1 0\n").unwrap();
    }

    #[test]
    fn accepts_extreme_weights() {
        validate_input("2 1\n1 2 1000000000\n").unwrap();
        validate_input("2 1\n1 2 -1000000000\n").unwrap();
    }

    // -------------------------------------------------------------------------
    // Bound violations
    // -------------------------------------------------------------------------

    #[test]
    fn rejects_n_below_two() {
        assert!(validate_input("1 0\n").is_err());
    }

    #[test]
    fn rejects_n_above_limit() {
        assert!(validate_input("200001 200000\n").is_err());
    }

    #[test]
    fn rejects_m_below_spanning_minimum() {
        // n=3 needs m >= 2
        let err = validate_input("3 1\n1 2 1\n").unwrap_err();
        assert!(err.contains("m="));
    }

    #[test]
    fn rejects_overweight_edge() {
        let err = validate_input("2 1\n1 2 1000000001\n").unwrap_err();
        assert!(err.contains("weight"));
    }

    #[test]
    fn rejects_vertex_out_of_range() {
        let err = validate_input("2 1\n1 3 1\n").unwrap_err();
        assert!(err.contains("out of range"));
    }

    // -------------------------------------------------------------------------
    // Connectivity
    // -------------------------------------------------------------------------

    #[test]
    fn rejects_disconnected_graph() {
        let err = validate_input("4 3\n1 2 1\n3 4 1\n3 4 2\n").unwrap_err();
        assert!(err.contains("not connected"));
    }

    #[test]
    fn self_loops_do_not_connect() {
        let err = validate_input("3 2\n1 2 1\n3 3 0\n").unwrap_err();
        assert!(err.contains("not connected"));
    }

    // -------------------------------------------------------------------------
    // Strict line shape
    // -------------------------------------------------------------------------

    #[test]
    fn rejects_blank_line() {
        let err = validate_input("2 1\n\n1 2 1\n").unwrap_err();
        assert!(err.contains("blank"));
    }

    #[test]
    fn rejects_tabs() {
        let err = validate_input("2 1\n1\t2 1\n").unwrap_err();
        assert!(err.contains("tab"));
    }

    #[test]
    fn rejects_double_spaces() {
        let err = validate_input("2 1\n1  2 1\n").unwrap_err();
        assert!(err.contains("spaces"));
    }

    #[test]
    fn rejects_trailing_space() {
        let err = validate_input("2 1 \n1 2 1\n").unwrap_err();
        assert!(err.contains("spaces"));
    }

    #[test]
    fn rejects_non_integer_token() {
        let err = validate_input("2 1\n1 x 1\n").unwrap_err();
        assert!(err.contains("non-integer"));
    }

    #[test]
    fn rejects_empty_input() {
        assert!(validate_input("").is_err());
        assert!(validate_input("\n").is_err());
    }

    #[test]
    fn rejects_wrong_edge_field_count() {
        let err = validate_input("2 1\n1 2\n").unwrap_err();
        assert!(err.contains("fields"));
    }

    #[test]
    fn rejects_extra_lines_after_t_cases() {
        let err = validate_input("1\n2 1\n1 2 1\n9 9 9\n").unwrap_err();
        assert!(err.contains("extra lines"));
    }

    #[test]
    fn rejects_truncated_case() {
        let err = validate_input("3 2\n1 2 1\n").unwrap_err();
        assert!(err.contains("remain"));
    }

    // -------------------------------------------------------------------------
    // Union-find
    // -------------------------------------------------------------------------

    #[test]
    fn dsu_tracks_components() {
        let mut dsu = Dsu::new(5);
        assert_eq!(dsu.components(), 5);
        dsu.union(0, 1);
        dsu.union(2, 3);
        assert_eq!(dsu.components(), 3);
        dsu.union(1, 0); // redundant
        assert_eq!(dsu.components(), 3);
        dsu.union(1, 2);
        dsu.union(3, 4);
        assert_eq!(dsu.components(), 1);
        assert_eq!(dsu.find(0), dsu.find(4));
    }
}
