use super::types::{NodeStack, Quadrant, ROOT};
use super::QuadTree;
use common::shapes::Rectangle;

/// Snapshot of one node handed to [`QuadTree::visit_nodes`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NodeView {
    pub boundary: Rectangle,
    pub depth: u32,
    pub divided: bool,
    /// Entities held directly; always 0 for divided nodes.
    pub entity_count: usize,
}

/// Borrowed handle to a node, for walking the tree by hand.
#[derive(Clone, Copy)]
pub struct NodeRef<'a> {
    tree: &'a QuadTree,
    index: u32,
}

impl<'a> NodeRef<'a> {
    fn node(&self) -> &'a super::types::Node {
        &self.tree.nodes[self.index as usize]
    }

    pub fn boundary(&self) -> Rectangle {
        self.node().boundary
    }

    pub fn depth(&self) -> u32 {
        self.node().depth
    }

    pub fn is_divided(&self) -> bool {
        self.node().is_divided()
    }

    pub fn is_leaf(&self) -> bool {
        !self.is_divided()
    }

    /// Values held directly by this node, in insertion order.
    pub fn entities(&self) -> impl Iterator<Item = u32> + 'a {
        self.node().items.iter().map(|item| item.value)
    }

    pub fn entity_count(&self) -> usize {
        self.node().items.len()
    }

    pub fn child(&self, quadrant: Quadrant) -> Option<NodeRef<'a>> {
        if !self.is_divided() {
            return None;
        }
        Some(NodeRef {
            tree: self.tree,
            index: self.node().children[quadrant.index()],
        })
    }

    pub fn children(&self) -> Option<[NodeRef<'a>; 4]> {
        if !self.is_divided() {
            return None;
        }
        let children = self.node().children;
        Some(children.map(|index| NodeRef {
            tree: self.tree,
            index,
        }))
    }
}

impl QuadTree {
    pub fn root(&self) -> NodeRef<'_> {
        NodeRef {
            tree: self,
            index: ROOT,
        }
    }

    /// Depth-first walk over every node, parents before children and
    /// children in north-west, north-east, south-west, south-east order.
    pub fn visit_nodes<F>(&self, mut f: F)
    where
        F: FnMut(NodeView),
    {
        let mut stack = NodeStack::new();
        stack.push(ROOT);
        while let Some(node_idx) = stack.pop() {
            let node = &self.nodes[node_idx as usize];
            f(NodeView {
                boundary: node.boundary,
                depth: node.depth,
                divided: node.is_divided(),
                entity_count: node.items.len(),
            });
            if node.is_divided() {
                for &child in node.children.iter().rev() {
                    stack.push(child);
                }
            }
        }
    }

    // Retrieve all node bounding boxes, e.g. for drawing the partition
    pub fn all_node_bounding_boxes(&self, bounding_boxes: &mut Vec<Rectangle>) {
        self.visit_nodes(|view| bounding_boxes.push(view.boundary));
    }

    // Retrieve every filed value
    pub fn all_entities(&self, values: &mut Vec<u32>) {
        for node in self.nodes.iter() {
            values.extend(node.items.iter().map(|item| item.value));
        }
    }
}
