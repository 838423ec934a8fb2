//! Boundary edge enumeration on the pixel-corner lattice.

use std::collections::HashSet;

use super::components::Component;
use crate::bitmap::Bitmap;

/// A directed unit edge between two lattice points.
///
/// Raster (y-down) coordinates. The filled side is on the right of the
/// direction of travel, so outer boundaries run clockwise on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Edge {
    pub start: (i32, i32),
    pub end: (i32, i32),
}

impl Edge {
    pub fn new(start: (i32, i32), end: (i32, i32)) -> Self {
        Edge { start, end }
    }

    /// Direction vector (dx, dy).
    pub fn direction(&self) -> (i32, i32) {
        (self.end.0 - self.start.0, self.end.1 - self.start.1)
    }

    fn is_vertical(&self) -> bool {
        self.start.0 == self.end.0
    }
}

/// Boundary edges of one component.
#[derive(Debug, Clone, Default)]
pub struct EdgeSet {
    pub edges: Vec<Edge>,
    /// Candidates discarded because both sides belong to the component.
    pub internal_removed: usize,
}

/// Enumerate the boundary edges of `component`.
///
/// A side of a pixel is a candidate when the neighbour across it is empty
/// or outside the bitmap. Candidates whose two lattice-adjacent pixels are
/// both members of the component are internal and dropped.
pub fn build(bitmap: &Bitmap, component: &Component) -> EdgeSet {
    let members: HashSet<(i32, i32)> = component.pixels.iter().copied().collect();
    let mut set = EdgeSet::default();

    for &(c, r) in &component.pixels {
        let candidates = [
            (!bitmap.get(c, r - 1), Edge::new((c, r), (c + 1, r))),
            (!bitmap.get(c + 1, r), Edge::new((c + 1, r), (c + 1, r + 1))),
            (!bitmap.get(c, r + 1), Edge::new((c + 1, r + 1), (c, r + 1))),
            (!bitmap.get(c - 1, r), Edge::new((c, r + 1), (c, r))),
        ];
        for (open, edge) in candidates {
            if !open {
                continue;
            }
            if is_internal(&edge, &members) {
                set.internal_removed += 1;
            } else {
                set.edges.push(edge);
            }
        }
    }

    set
}

/// Both pixels flanking the edge are in the component.
fn is_internal(edge: &Edge, members: &HashSet<(i32, i32)>) -> bool {
    let (before, after) = if edge.is_vertical() {
        let x = edge.start.0;
        let y = edge.start.1.min(edge.end.1);
        ((x - 1, y), (x, y))
    } else {
        let y = edge.start.1;
        let x = edge.start.0.min(edge.end.0);
        ((x, y - 1), (x, y))
    };
    members.contains(&before) && members.contains(&after)
}
