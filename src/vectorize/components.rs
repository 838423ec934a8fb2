//! 8-connected component labelling.

use crate::bitmap::Bitmap;

/// Neighbour visit order: orthogonal first, then diagonals.
const NEIGHBOURS: [(i32, i32); 8] = [
    (0, -1),  // top
    (0, 1),   // bottom
    (-1, 0),  // left
    (1, 0),   // right
    (-1, -1), // top-left
    (1, -1),  // top-right
    (-1, 1),  // bottom-left
    (1, 1),   // bottom-right
];

/// Filled pixels that are mutually reachable through edge or corner contact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Component {
    /// Pixels as (col, row), in flood-fill visit order.
    pub pixels: Vec<(i32, i32)>,
}

impl Component {
    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }
}

/// Partition the filled pixels of `bitmap` into 8-connected components.
///
/// Seeds are taken in row-major order. The flood fill uses an explicit
/// stack; neighbours are pushed in reverse so they pop in `NEIGHBOURS`
/// order, giving the same visit order as a depth-first recursion.
pub fn find(bitmap: &Bitmap) -> Vec<Component> {
    let (w, h) = (bitmap.width(), bitmap.height());
    let mut visited = vec![false; w * h];
    let mut components = Vec::new();
    let mut stack: Vec<(i32, i32)> = Vec::new();

    for (col, row) in bitmap.filled() {
        if visited[row as usize * w + col as usize] {
            continue;
        }

        let mut pixels = Vec::new();
        stack.push((col, row));
        while let Some((c, r)) = stack.pop() {
            if !bitmap.get(c, r) {
                continue;
            }
            let idx = r as usize * w + c as usize;
            if visited[idx] {
                continue;
            }
            visited[idx] = true;
            pixels.push((c, r));

            for &(dc, dr) in NEIGHBOURS.iter().rev() {
                stack.push((c + dc, r + dr));
            }
        }
        components.push(Component { pixels });
    }

    components
}
