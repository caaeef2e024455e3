use std::borrow::Borrow;
use std::ops::Sub;

use super::{Axis, FloatType, WorldBox, WorldPoint};

#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct AABB<Point> {
    pub min: Point,
    pub max: Point,
}

impl<Point> AABB<Point> {
    pub fn new(min: Point, max: Point) -> AABB<Point> {
        AABB { min, max }
    }
}

impl<Point: Sub + Copy> AABB<Point> {
    pub fn size(&self) -> Point::Output {
        self.max - self.min
    }
}

impl WorldBox {
    /// Box that contains nothing, neutral element of `union`.
    pub fn empty() -> WorldBox {
        AABB {
            min: WorldPoint::from(nalgebra::Vector3::repeat(FloatType::INFINITY)),
            max: WorldPoint::from(nalgebra::Vector3::repeat(FloatType::NEG_INFINITY)),
        }
    }

    /// Returns true if the box contains no points.
    /// Boxes with zero size in some dimension are not empty.
    pub fn is_empty(&self) -> bool {
        self.min
            .iter()
            .zip(self.max.iter())
            .any(|(min, max)| min > max)
    }

    /// Returns the smallest box containing all the points, or None if the iterator is empty.
    pub fn from_points<P: Borrow<WorldPoint>>(points: impl IntoIterator<Item = P>) -> Option<WorldBox> {
        let mut points = points.into_iter();
        let first = *points.next()?.borrow();
        let mut ret = WorldBox::new(first, first);
        for p in points {
            ret.extend_point(p.borrow());
        }
        Some(ret)
    }

    pub fn extend_point(&mut self, p: &WorldPoint) {
        self.min = self.min.inf(p);
        self.max = self.max.sup(p);
    }

    /// Grows the box to contain the other box as well.
    pub fn extend(&mut self, other: &WorldBox) {
        self.min = self.min.inf(&other.min);
        self.max = self.max.sup(&other.max);
    }

    pub fn union(&self, other: &WorldBox) -> WorldBox {
        AABB {
            min: self.min.inf(&other.min),
            max: self.max.sup(&other.max),
        }
    }

    /// Half of the surface area. Infinite for empty boxes.
    pub fn half_area(&self) -> FloatType {
        if self.is_empty() {
            return FloatType::INFINITY;
        }
        let d = self.size();
        d.x * d.y + d.y * d.z + d.z * d.x
    }

    pub fn contains_box(&self, other: &WorldBox) -> bool {
        other.is_empty()
            || Axis::ALL.iter().all(|axis| {
                let i = axis.index();
                self.min[i] <= other.min[i] && other.max[i] <= self.max[i]
            })
    }
}
