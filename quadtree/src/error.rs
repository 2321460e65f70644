use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum QuadtreeError {
    InvalidNodeCapacity { node_capacity: usize },
    InvalidRectangleDims { width: f32, height: f32 },
}

pub type QuadtreeResult<T> = Result<T, QuadtreeError>;

impl fmt::Display for QuadtreeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuadtreeError::InvalidNodeCapacity { node_capacity } => {
                write!(
                    f,
                    "node capacity must be at least 1 (node_capacity: {})",
                    node_capacity
                )
            }
            QuadtreeError::InvalidRectangleDims { width, height } => {
                write!(
                    f,
                    "rectangle width/height must be finite and positive (width: {}, height: {})",
                    width, height
                )
            }
        }
    }
}

impl std::error::Error for QuadtreeError {}
