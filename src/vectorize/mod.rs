//! Vectorization pipeline: bitmap → closed lattice loops.
//!
//! 1. 8-connected component labelling
//! 2. Boundary edge enumeration with internal-edge filtering
//! 3. Rightmost-turn loop stitching
//! 4. Collinear vertex removal

pub mod components;
pub mod edges;
pub mod simplify;
pub mod stitch;

use crate::bitmap::Bitmap;

/// Counters collected while tracing one bitmap.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TraceStats {
    pub components: usize,
    pub edges: usize,
    pub internal_edges_removed: usize,
    /// Walks that could not be closed (malformed components).
    pub abandoned_loops: usize,
    /// Closed loops dropped for having ≤ 2 vertices after simplification.
    pub degenerate_loops: usize,
}

/// Traced outline in pixel-corner coordinates (y-down).
#[derive(Debug, Clone, Default)]
pub struct Trace {
    /// Simplified loops, grouped by component in discovery order.
    pub loops: Vec<Vec<(i32, i32)>>,
    pub stats: TraceStats,
}

/// Trace every component of `bitmap` into simplified closed loops.
pub fn trace(bitmap: &Bitmap) -> Trace {
    let mut out = Trace::default();

    for component in components::find(bitmap) {
        out.stats.components += 1;

        let set = edges::build(bitmap, &component);
        out.stats.edges += set.edges.len();
        out.stats.internal_edges_removed += set.internal_removed;

        let stitched = stitch::stitch(&set.edges);
        out.stats.abandoned_loops += stitched.abandoned;

        for raw in stitched.loops {
            let simple = simplify::simplify(&raw);
            if simple.len() > 2 {
                out.loops.push(simple);
            } else {
                out.stats.degenerate_loops += 1;
            }
        }
    }

    out
}

/// Shoelace area of a lattice loop, doubled to stay integral.
///
/// Positive for loops that run clockwise on screen (y-down), i.e. outer
/// boundaries; holes come out negative.
pub fn doubled_area(points: &[(i32, i32)]) -> i64 {
    let n = points.len();
    if n < 3 {
        return 0;
    }
    let mut area: i64 = 0;
    for i in 0..n {
        let j = (i + 1) % n;
        area += points[i].0 as i64 * points[j].1 as i64 - points[j].0 as i64 * points[i].1 as i64;
    }
    area
}

#[cfg(test)]
mod tests {
    use super::*;

    fn area(trace: &Trace) -> i64 {
        trace.loops.iter().map(|l| doubled_area(l)).sum::<i64>() / 2
    }

    #[test]
    fn single_pixel() {
        let trace = trace(&Bitmap::from_rows(&[[1]]));
        assert_eq!(trace.loops, vec![vec![(0, 0), (1, 0), (1, 1), (0, 1)]]);
        assert_eq!(trace.stats.internal_edges_removed, 0);
        assert_eq!(trace.stats.edges, 4);
    }

    #[test]
    fn solid_block() {
        let trace = trace(&Bitmap::from_rows(&[[1, 1], [1, 1]]));
        assert_eq!(trace.loops, vec![vec![(0, 0), (2, 0), (2, 2), (0, 2)]]);
    }

    #[test]
    fn l_tromino_keeps_six_corners() {
        let trace = trace(&Bitmap::from_rows(&[[1, 1], [1, 0]]));
        assert_eq!(trace.loops.len(), 1);
        assert_eq!(trace.loops[0].len(), 6);
    }

    #[test]
    fn area_matches_pixel_count() {
        let bitmaps = [
            Bitmap::from_rows(&[[1, 0, 1], [0, 1, 0], [1, 0, 1]]),
            Bitmap::from_rows(&[[1, 1, 1], [1, 0, 1], [1, 1, 1]]),
            Bitmap::from_rows(&[[0, 1, 1, 0], [1, 0, 0, 1], [1, 1, 1, 1], [1, 0, 0, 1]]),
        ];
        for bitmap in &bitmaps {
            let trace = trace(bitmap);
            assert_eq!(trace.stats.abandoned_loops, 0);
            assert_eq!(area(&trace), bitmap.filled_count() as i64);
        }
    }

    #[test]
    fn empty_bitmap_traces_nothing() {
        let trace = trace(&Bitmap::new(3, 3));
        assert!(trace.loops.is_empty());
        assert_eq!(trace.stats, TraceStats::default());
    }
}
