use std::ops::Index;

use super::{WorldBox, WorldPoint};

#[derive(Clone, Debug, PartialEq)]
pub struct Triangle<Point>([Point; 3]);

impl<Point> Triangle<Point> {
    pub fn new(a: Point, b: Point, c: Point) -> Triangle<Point> {
        Triangle([a, b, c])
    }

    pub fn iter<'a>(&'a self) -> impl Iterator<Item = &'a Point> {
        self.0.iter()
    }

    pub fn map<Point2, F: FnMut(&Point) -> Point2>(&self, mut f: F) -> Triangle<Point2> {
        Triangle([f(&self[0]), f(&self[1]), f(&self[2])])
    }
}

impl<Point> Index<usize> for Triangle<Point> {
    type Output = Point;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl Triangle<WorldPoint> {
    /// Tight axis aligned bounding box of the triangle
    pub fn bounds(&self) -> WorldBox {
        let mut ret = WorldBox::new(self[0], self[0]);
        ret.extend_point(&self[1]);
        ret.extend_point(&self[2]);
        ret
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::test::TriangleWrapper;
    use assert2::assert;
    use test_strategy::proptest;

    #[test]
    fn bounds_simple() {
        let t = Triangle::new(
            WorldPoint::new(0.0, 1.0, 2.0),
            WorldPoint::new(3.0, -1.0, 2.0),
            WorldPoint::new(1.0, 0.0, 5.0),
        );
        let b = t.bounds();
        assert!(b.min == WorldPoint::new(0.0, -1.0, 2.0));
        assert!(b.max == WorldPoint::new(3.0, 1.0, 5.0));
    }

    #[proptest]
    fn bounds_match_from_points(t: TriangleWrapper) {
        assert!(Some(t.bounds()) == WorldBox::from_points(t.iter()));
    }

    #[test]
    fn map_indices_to_points() {
        let points = [
            WorldPoint::new(0.0, 0.0, 0.0),
            WorldPoint::new(1.0, 0.0, 0.0),
            WorldPoint::new(0.0, 1.0, 0.0),
        ];
        let indexed = Triangle::new(2usize, 0, 1);
        let t = indexed.map(|i| points[*i]);
        assert!(t == Triangle::new(points[2], points[0], points[1]));
    }
}
