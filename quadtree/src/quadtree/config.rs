#[derive(Debug, Clone)]
pub struct Config {
    /// Arena slots reserved up front; the arena still grows past this.
    pub pool_size: usize,
    /// Entities a leaf holds before it subdivides.
    pub node_capacity: usize,
    /// Depth at which leaves stop subdividing and accept entities beyond
    /// capacity. `None` leaves the tree unbounded.
    pub max_depth: Option<usize>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            pool_size: 256,
            node_capacity: 5,
            max_depth: None,
        }
    }
}
