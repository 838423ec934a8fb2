//! Loop stitching: boundary edges → closed lattice loops.
//!
//! Edges are walked head to tail. Where several unvisited edges leave the
//! same lattice point (a pinch where two parts of a component meet at a
//! corner), the walk takes the edge with the largest turn measure
//! `atan2(-cross, dot)` relative to the incoming direction. The comparison
//! is done exactly on integer vectors; equal measures keep the lowest
//! edge index.

use std::cmp::Ordering;
use std::collections::HashMap;

use super::edges::Edge;

/// Closed loops stitched from one component's edges.
#[derive(Debug, Clone, Default)]
pub struct Stitched {
    /// Lattice points of each closed loop; the closing point is implicit.
    pub loops: Vec<Vec<(i32, i32)>>,
    /// Walks that ran out of continuing edges before closing.
    pub abandoned: usize,
}

/// Link `edges` into closed loops.
///
/// Every edge is consumed at most once. For a well-formed edge set every
/// edge ends up in exactly one loop and `abandoned` is zero.
pub fn stitch(edges: &[Edge]) -> Stitched {
    let mut outgoing: HashMap<(i32, i32), Vec<usize>> = HashMap::new();
    for (i, edge) in edges.iter().enumerate() {
        outgoing.entry(edge.start).or_default().push(i);
    }

    let mut used = vec![false; edges.len()];
    let mut result = Stitched::default();

    for first in 0..edges.len() {
        if used[first] {
            continue;
        }
        used[first] = true;

        let origin = edges[first].start;
        let mut points = vec![origin];
        let mut last = first;
        let mut cursor = edges[first].end;

        let closed = loop {
            if cursor == origin {
                break true;
            }
            points.push(cursor);
            match next_edge(edges, &used, &outgoing, edges[last].direction(), cursor) {
                Some(next) => {
                    used[next] = true;
                    last = next;
                    cursor = edges[next].end;
                }
                None => break false,
            }
        };

        if closed {
            result.loops.push(points);
        } else {
            result.abandoned += 1;
        }
    }

    result
}

/// The unvisited edge leaving `at` with the largest turn from `incoming`.
fn next_edge(
    edges: &[Edge],
    used: &[bool],
    outgoing: &HashMap<(i32, i32), Vec<usize>>,
    incoming: (i32, i32),
    at: (i32, i32),
) -> Option<usize> {
    let mut best: Option<(usize, (i64, i64))> = None;
    for &i in outgoing.get(&at)? {
        if used[i] {
            continue;
        }
        let measure = turn(incoming, edges[i].direction());
        match best {
            Some((_, current)) if compare_angle(measure, current) != Ordering::Greater => {}
            _ => best = Some((i, measure)),
        }
    }
    best.map(|(i, _)| i)
}

/// The vector `(dot, -cross)`, whose polar angle is the turn measure.
fn turn(incoming: (i32, i32), outgoing: (i32, i32)) -> (i64, i64) {
    let (ix, iy) = (incoming.0 as i64, incoming.1 as i64);
    let (ox, oy) = (outgoing.0 as i64, outgoing.1 as i64);
    let cross = ix * oy - iy * ox;
    let dot = ix * ox + iy * oy;
    (dot, -cross)
}

/// Order two vectors by polar angle in `(-π, π]`, as `atan2(y, x)` would.
fn compare_angle(a: (i64, i64), b: (i64, i64)) -> Ordering {
    half(a).cmp(&half(b)).then_with(|| {
        let cross = a.0 * b.1 - a.1 * b.0;
        0.cmp(&cross)
    })
}

/// Angular bucket: (-π, 0), 0, (0, π), π.
fn half((x, y): (i64, i64)) -> u8 {
    if y < 0 {
        0
    } else if y == 0 && x >= 0 {
        1
    } else if y > 0 {
        2
    } else {
        3
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bitmap::Bitmap;
    use crate::vectorize::{components, edges};

    fn loops_of(rows: &[&[u8]]) -> Vec<Stitched> {
        let bitmap = Bitmap::from_rows(rows);
        components::find(&bitmap)
            .iter()
            .map(|c| stitch(&edges::build(&bitmap, c).edges))
            .collect()
    }

    #[test]
    fn single_pixel_loop_is_clockwise() {
        let out = loops_of(&[&[1]]);
        assert_eq!(out[0].loops, vec![vec![(0, 0), (1, 0), (1, 1), (0, 1)]]);
        assert_eq!(out[0].abandoned, 0);
    }

    #[test]
    fn diagonal_pinch_makes_one_loop() {
        let out = loops_of(&[&[1, 0], &[0, 1]]);
        assert_eq!(out.len(), 1);
        assert_eq!(
            out[0].loops,
            vec![vec![
                (0, 0),
                (1, 0),
                (1, 1),
                (2, 1),
                (2, 2),
                (1, 2),
                (1, 1),
                (0, 1),
            ]]
        );
    }

    #[test]
    fn anti_diagonal_pinch_makes_one_loop() {
        let out = loops_of(&[&[0, 1], &[1, 0]]);
        assert_eq!(out[0].loops.len(), 1);
        assert_eq!(out[0].loops[0].len(), 8);
        assert_eq!(out[0].loops[0][0], (1, 0));
    }

    #[test]
    fn ring_yields_outer_and_hole() {
        let out = loops_of(&[&[1, 1, 1], &[1, 0, 1], &[1, 1, 1]]);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].loops.len(), 2);
        let lengths: Vec<_> = out[0].loops.iter().map(Vec::len).collect();
        assert_eq!(lengths, vec![12, 4]);
    }

    #[test]
    fn every_edge_is_consumed_once() {
        let bitmap = Bitmap::from_rows(&[
            [1, 0, 1, 1, 0],
            [0, 1, 0, 1, 1],
            [1, 1, 0, 0, 1],
            [1, 0, 1, 1, 1],
        ]);
        for component in components::find(&bitmap) {
            let set = edges::build(&bitmap, &component);
            let out = stitch(&set.edges);
            assert_eq!(out.abandoned, 0);
            let walked: usize = out.loops.iter().map(Vec::len).sum();
            assert_eq!(walked, set.edges.len());
        }
    }

    #[test]
    fn broken_edge_set_is_abandoned() {
        let edges = [Edge::new((0, 0), (1, 0)), Edge::new((1, 0), (1, 1))];
        let out = stitch(&edges);
        assert!(out.loops.is_empty());
        assert_eq!(out.abandoned, 1);
    }

    #[test]
    fn open_walk_does_not_block_later_loops() {
        let mut edges = vec![Edge::new((5, 5), (6, 5))];
        edges.extend([
            Edge::new((0, 0), (1, 0)),
            Edge::new((1, 0), (1, 1)),
            Edge::new((1, 1), (0, 1)),
            Edge::new((0, 1), (0, 0)),
        ]);
        let out = stitch(&edges);
        assert_eq!(out.abandoned, 1);
        assert_eq!(out.loops, vec![vec![(0, 0), (1, 0), (1, 1), (0, 1)]]);
    }

    #[test]
    fn turn_measure_matches_atan2_order() {
        let incoming = (1, 0);
        let dirs = [(0, 1), (1, 0), (0, -1), (-1, 0)];
        let mut by_exact: Vec<_> = dirs.to_vec();
        by_exact.sort_by(|&a, &b| compare_angle(turn(incoming, a), turn(incoming, b)));
        let mut by_float: Vec<_> = dirs.to_vec();
        by_float.sort_by(|&a, &b| {
            let fa = turn(incoming, a);
            let fb = turn(incoming, b);
            let fa = (fa.1 as f64).atan2(fa.0 as f64);
            let fb = (fb.1 as f64).atan2(fb.0 as f64);
            fa.total_cmp(&fb)
        });
        assert_eq!(by_exact, by_float);
        assert_eq!(by_exact, vec![(0, 1), (1, 0), (0, -1), (-1, 0)]);
    }
}
