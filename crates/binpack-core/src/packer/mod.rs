use crate::error::{PackError, Result};
use crate::model::Frame;

pub mod free_space;
pub mod guillotine;
pub mod heuristics;
pub mod maxrects;

/// A packer places keyed rectangles into a single bin.
///
/// Implementations must never produce overlapping placements. `pack` returns
/// `PackError::OutOfSpace` if the rectangle cannot be placed in the bin.
pub trait Packer<K> {
    fn can_pack(&self, w: u32, h: u32) -> bool;
    fn pack(&mut self, key: K, w: u32, h: u32) -> Result<Frame<K>>;
}

/// Rejects requests with a zero side before they reach the free list.
pub(crate) fn validate_request(w: u32, h: u32) -> Result<()> {
    if w == 0 || h == 0 {
        return Err(PackError::InvalidSize {
            width: w,
            height: h,
        });
    }
    Ok(())
}
