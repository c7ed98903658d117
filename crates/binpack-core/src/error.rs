use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PackError {
    #[error("Invalid bin dimensions: {width}x{height} (both sides must be greater than 0)")]
    InvalidDimensions { width: u32, height: u32 },
    #[error("Invalid rectangle size: {width}x{height} (both sides must be greater than 0)")]
    InvalidSize { width: u32, height: u32 },
    #[error("No free rectangle can hold {width}x{height}")]
    OutOfSpace { width: u32, height: u32 },
    #[error("Unknown heuristic: {0}")]
    UnknownHeuristic(String),
}

impl PackError {
    /// True for the overflow outcome (the request did not fit anywhere).
    pub fn is_out_of_space(&self) -> bool {
        matches!(self, PackError::OutOfSpace { .. })
    }
}

pub type Result<T> = std::result::Result<T, PackError>;
