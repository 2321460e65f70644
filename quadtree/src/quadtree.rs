//! Point quadtree rebuilt once per simulation tick.
//!
//! Nodes live in a single arena and refer to their children by index. Each
//! entity is filed under the center of its bounding box, so an entity whose box
//! straddles a node edge still lives in exactly one leaf. Queries therefore
//! return candidates that the caller confirms with an exact box test.

mod config;
mod core;
mod query_rect;
mod types;
mod visit;

pub use config::Config;
pub use types::{Quadrant, QueryWindow};
pub use visit::{NodeRef, NodeView};

use common::shapes::{Point, Rectangle};
use types::Node;

/// Anything the index can file: a stable id for the current tick and an
/// axis-aligned bounding box.
pub trait SpatialEntity {
    fn id(&self) -> u32;
    fn bounding_box(&self) -> Rectangle;

    fn center(&self) -> Point {
        self.bounding_box().center()
    }
}

impl<T: SpatialEntity + ?Sized> SpatialEntity for &T {
    fn id(&self) -> u32 {
        (**self).id()
    }

    fn bounding_box(&self) -> Rectangle {
        (**self).bounding_box()
    }

    fn center(&self) -> Point {
        (**self).center()
    }
}

pub struct QuadTree {
    nodes: Vec<Node>,
    config: Config,
    len: usize,
    dropped: usize,
    max_depth_reached: u32,
}
