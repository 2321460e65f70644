use super::types::{NodeStack, ROOT};
use super::QuadTree;
use common::shapes::Rectangle;

impl QuadTree {
    /// Appends the value of every entity whose point lies inside `range`.
    ///
    /// Each entity lives in exactly one leaf, so a single call never reports
    /// the same value twice. `candidates` is not cleared first.
    pub fn query_entities(&self, range: &Rectangle, candidates: &mut Vec<u32>) {
        self.query_entities_with(range, |value| candidates.push(value));
    }

    pub fn query_entities_with<F>(&self, range: &Rectangle, mut f: F)
    where
        F: FnMut(u32),
    {
        let mut stack = NodeStack::new();
        stack.push(ROOT);
        while let Some(node_idx) = stack.pop() {
            let node = &self.nodes[node_idx as usize];
            if !node.boundary.intersects(range) {
                continue;
            }

            for item in node.items.iter() {
                if range.contains_point(item.point) {
                    f(item.value);
                }
            }

            if node.is_divided() {
                // Pushed in reverse so the north-west child is popped first.
                for &child in node.children.iter().rev() {
                    stack.push(child);
                }
            }
        }
    }

    /// Convenience form of [`QuadTree::query_entities`] that allocates.
    pub fn query(&self, range: &Rectangle) -> Vec<u32> {
        let mut candidates = Vec::new();
        self.query_entities(range, &mut candidates);
        candidates
    }
}
