use crate::error::{QuadtreeError, QuadtreeResult};
use common::shapes::{Point, Rectangle};
use smallvec::SmallVec;

pub(crate) const ROOT: u32 = 0;
// The root is never anyone's child, so 0 doubles as "no child".
pub(crate) const NO_CHILD: u32 = 0;
pub(crate) const NODE_ITEMS_INLINE: usize = 8;

#[derive(Clone, Copy, Debug)]
pub(crate) struct NodeItem {
    pub(crate) value: u32,
    pub(crate) point: Point,
}

#[derive(Clone, Debug)]
pub(crate) struct Node {
    pub(crate) boundary: Rectangle,
    pub(crate) depth: u32,
    pub(crate) children: [u32; 4],
    pub(crate) items: SmallVec<[NodeItem; NODE_ITEMS_INLINE]>,
}

impl Node {
    pub(crate) fn new_leaf(boundary: Rectangle, depth: u32) -> Self {
        Self {
            boundary,
            depth,
            children: [NO_CHILD; 4],
            items: SmallVec::new(),
        }
    }

    // Children are created together, so checking one slot is enough.
    #[inline(always)]
    pub(crate) fn is_divided(&self) -> bool {
        self.children[3] != NO_CHILD
    }
}

pub(crate) type NodeStack = SmallVec<[u32; 64]>;

/// The four children of a divided node, in the order they are tried on insert
/// and visited on traversal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Quadrant {
    NorthWest,
    NorthEast,
    SouthWest,
    SouthEast,
}

impl Quadrant {
    pub const ALL: [Quadrant; 4] = [
        Quadrant::NorthWest,
        Quadrant::NorthEast,
        Quadrant::SouthWest,
        Quadrant::SouthEast,
    ];

    #[inline(always)]
    pub fn index(self) -> usize {
        match self {
            Quadrant::NorthWest => 0,
            Quadrant::NorthEast => 1,
            Quadrant::SouthWest => 2,
            Quadrant::SouthEast => 3,
        }
    }

    /// This quadrant's share of `parent`: half its width and half its height.
    pub fn boundary_within(self, parent: &Rectangle) -> Rectangle {
        let half_width = parent.width / 2.0;
        let half_height = parent.height / 2.0;
        let (x, y) = match self {
            Quadrant::NorthWest => (parent.x, parent.y),
            Quadrant::NorthEast => (parent.x + half_width, parent.y),
            Quadrant::SouthWest => (parent.x, parent.y + half_height),
            Quadrant::SouthEast => (parent.x + half_width, parent.y + half_height),
        };
        Rectangle {
            x,
            y,
            width: half_width,
            height: half_height,
        }
    }
}

/// Fixed-size window centered on an entity, used to look up its collision
/// candidates. Its size is independent of the entity's own size.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct QueryWindow {
    width: f32,
    height: f32,
}

impl QueryWindow {
    pub fn new(width: f32, height: f32) -> QuadtreeResult<Self> {
        validate_rect_dims(width, height)?;
        Ok(Self { width, height })
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn around(&self, center: Point) -> Rectangle {
        Rectangle::from_center(center, self.width, self.height)
    }
}

impl Default for QueryWindow {
    fn default() -> Self {
        Self {
            width: 24.0,
            height: 24.0,
        }
    }
}

pub(crate) fn validate_rect_dims(width: f32, height: f32) -> QuadtreeResult<()> {
    // An empty window intersects nothing, so it would never find a candidate
    if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
        return Err(QuadtreeError::InvalidRectangleDims { width, height });
    }
    Ok(())
}

pub(crate) fn validate_node_capacity(node_capacity: usize) -> QuadtreeResult<()> {
    if node_capacity == 0 {
        return Err(QuadtreeError::InvalidNodeCapacity { node_capacity });
    }
    Ok(())
}
