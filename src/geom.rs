//! Shared geometry utilities.

use kurbo::{BezPath, PathEl, Point};

/// Closed polyline through integer vertices.
pub fn polygon_path(points: &[(i32, i32)]) -> BezPath {
    let mut path = BezPath::new();
    let mut iter = points.iter().map(|&(x, y)| Point::new(x as f64, y as f64));
    if let Some(first) = iter.next() {
        path.move_to(first);
        for p in iter {
            path.line_to(p);
        }
        path.close_path();
    }
    path
}

/// Signed area of a BezPath via the shoelace formula (on-curve points only).
///
/// Positive = counter-clockwise, negative = clockwise (y-up).
pub fn signed_area(path: &BezPath) -> f64 {
    let mut area = 0.0;
    let mut first = Point::ZERO;
    let mut current = Point::ZERO;
    for el in path.elements() {
        match *el {
            PathEl::MoveTo(p) => {
                first = p;
                current = p;
            }
            PathEl::LineTo(p) | PathEl::CurveTo(_, _, p) | PathEl::QuadTo(_, p) => {
                area += current.x * p.y - p.x * current.y;
                current = p;
            }
            PathEl::ClosePath => {
                area += current.x * first.y - first.x * current.y;
            }
        }
    }
    area / 2.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn square_path_area() {
        let ccw = polygon_path(&[(0, 0), (2, 0), (2, 2), (0, 2)]);
        assert_eq!(ccw.elements().len(), 5);
        assert_eq!(signed_area(&ccw), 4.0);
        let cw = polygon_path(&[(0, 0), (0, 2), (2, 2), (2, 0)]);
        assert_eq!(signed_area(&cw), -4.0);
    }

    #[test]
    fn empty_input_gives_empty_path() {
        assert!(polygon_path(&[]).elements().is_empty());
    }
}
