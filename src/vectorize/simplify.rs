//! Collinear vertex removal for axis-aligned lattice loops.

/// Drop vertices that sit in the middle of a horizontal or vertical run.
///
/// A vertex is compared against the last kept vertex and the next input
/// vertex (wrapping). The first vertex is always kept so the loop keeps a
/// fixed starting point. Loops with fewer than 3 vertices come back as-is.
pub fn simplify(points: &[(i32, i32)]) -> Vec<(i32, i32)> {
    let n = points.len();
    if n < 3 {
        return points.to_vec();
    }

    let mut kept: Vec<(i32, i32)> = Vec::with_capacity(n);
    for i in 0..n {
        let prev = kept.last().copied().unwrap_or(points[n - 1]);
        let curr = points[i];
        let next = points[(i + 1) % n];

        let horizontal = prev.1 == curr.1 && curr.1 == next.1;
        let vertical = prev.0 == curr.0 && curr.0 == next.0;
        if kept.is_empty() || !(horizontal || vertical) {
            kept.push(curr);
        }
    }
    kept
}
