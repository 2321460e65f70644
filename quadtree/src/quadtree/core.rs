use super::types::{validate_node_capacity, Node, NodeItem, Quadrant, ROOT};
use super::{Config, QuadTree, SpatialEntity};
use crate::error::QuadtreeResult;
use common::shapes::{Point, Rectangle};
use tracing::{trace, warn};

impl QuadTree {
    pub fn new_with_config(bounding_box: Rectangle, config: Config) -> QuadtreeResult<Self> {
        validate_node_capacity(config.node_capacity)?;
        Ok(Self::from_parts(bounding_box, config))
    }

    pub fn new(bounding_box: Rectangle) -> Self {
        Self::from_parts(bounding_box, Config::default())
    }

    fn from_parts(bounding_box: Rectangle, config: Config) -> Self {
        let mut nodes = Vec::with_capacity(config.pool_size.max(1));
        nodes.push(Node::new_leaf(bounding_box, 0));
        Self {
            nodes,
            config,
            len: 0,
            dropped: 0,
            max_depth_reached: 0,
        }
    }

    /// Drops every node and entity and starts over from a single leaf covering
    /// `bounding_box`. The arena keeps its allocation for the next rebuild.
    pub fn reset(&mut self, bounding_box: Rectangle) {
        trace!(nodes = self.nodes.len(), entities = self.len, "resetting quadtree");
        self.nodes.clear();
        self.nodes.push(Node::new_leaf(bounding_box, 0));
        self.len = 0;
        self.dropped = 0;
        self.max_depth_reached = 0;
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn boundary(&self) -> Rectangle {
        self.nodes[ROOT as usize].boundary
    }

    /// Entities currently filed in the tree.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn depth(&self) -> u32 {
        self.max_depth_reached
    }

    /// Entities that were accepted and later lost because no child accepted
    /// them when their node subdivided.
    pub fn dropped(&self) -> usize {
        self.dropped
    }

    /// Files `entity` under the center of its bounding box. Returns `false`
    /// when the center lies outside the tree's boundary.
    pub fn insert<E: SpatialEntity + ?Sized>(&mut self, entity: &E) -> bool {
        self.insert_point(entity.id(), entity.center())
    }

    pub fn insert_point(&mut self, value: u32, point: Point) -> bool {
        let inserted = self.insert_into(ROOT, NodeItem { value, point });
        if inserted {
            self.len += 1;
        } else {
            trace!(value, x = point.x, y = point.y, "quadtree rejected point");
        }
        inserted
    }

    fn insert_into(&mut self, node_idx: u32, item: NodeItem) -> bool {
        let node = &self.nodes[node_idx as usize];
        if !node.boundary.contains_point(item.point) {
            return false;
        }

        if !node.is_divided() {
            let at_max_depth = self
                .config
                .max_depth
                .map_or(false, |max_depth| node.depth as usize >= max_depth);
            if node.items.len() < self.config.node_capacity || at_max_depth {
                self.nodes[node_idx as usize].items.push(item);
                return true;
            }
            self.subdivide(node_idx);
        }

        let children = self.nodes[node_idx as usize].children;
        children
            .into_iter()
            .any(|child| self.insert_into(child, item))
    }

    // Split a full leaf into quadrants and push its entities down
    fn subdivide(&mut self, node_idx: u32) {
        let (boundary, depth) = {
            let node = &self.nodes[node_idx as usize];
            (node.boundary, node.depth + 1)
        };

        let first_child = self.nodes.len() as u32;
        for quadrant in Quadrant::ALL {
            self.nodes
                .push(Node::new_leaf(quadrant.boundary_within(&boundary), depth));
        }
        self.max_depth_reached = self.max_depth_reached.max(depth);

        let node = &mut self.nodes[node_idx as usize];
        node.children = [
            first_child,
            first_child + 1,
            first_child + 2,
            first_child + 3,
        ];
        let items = std::mem::take(&mut node.items);
        trace!(node = node_idx, depth, entities = items.len(), "subdividing node");

        let children = self.nodes[node_idx as usize].children;
        for item in items {
            let placed = children
                .into_iter()
                .any(|child| self.insert_into(child, item));
            if !placed {
                self.len -= 1;
                self.dropped += 1;
                warn!(
                    value = item.value,
                    x = item.point.x,
                    y = item.point.y,
                    "no quadrant accepted entity during subdivision"
                );
            }
        }
    }
}
