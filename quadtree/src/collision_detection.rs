use crate::quadtree::SpatialEntity;
use common::shapes::{Point, Rectangle};

// Strict overlap of two half-open rectangles; shared edges do not collide
pub fn rectangle_rectangle(a: &Rectangle, b: &Rectangle) -> bool {
    a.intersects(b)
}

pub fn point_rectangle(point: Point, rectangle: &Rectangle) -> bool {
    rectangle.contains_point(point)
}

/// Exact test between two entities' bounding boxes, used to confirm the
/// candidates a range query returns.
pub fn entity_entity<A, B>(a: &A, b: &B) -> bool
where
    A: SpatialEntity + ?Sized,
    B: SpatialEntity + ?Sized,
{
    rectangle_rectangle(&a.bounding_box(), &b.bounding_box())
}
