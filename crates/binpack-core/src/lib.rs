//! Rectangle bin packing into a single fixed-size bin.
//!
//! - Guillotine: disjoint free rectangles, choice heuristic (6) + split heuristic (6), optional merge pass
//! - MaxRects: overlapping maximal free rectangles, 5 placement heuristics, prune pass, greedy batch mode
//! - Overflow is reported as `PackError::OutOfSpace` and latched in a per-bin flag; opening a new bin is up to the caller.
//!
//! Quick example:
//! ```
//! use binpack_core::prelude::*;
//! # fn main() -> binpack_core::Result<()> {
//! let cfg = BinConfig::builder()
//!     .with_dimensions(10, 10)
//!     .g_choice(GuillotineChoice::BestAreaFit)
//!     .g_split(GuillotineSplit::SplitShorterAxis)
//!     .build();
//! let mut bin = GuillotineBin::new(cfg)?;
//! let a = bin.insert(6, 10)?;
//! let b = bin.insert(4, 10)?;
//! assert_eq!(a.rect, Rect::new(0, 0, 6, 10));
//! assert_eq!(b.rect, Rect::new(6, 0, 4, 10));
//! assert_eq!(bin.occupancy(), 1.0);
//! assert!(bin.insert(1, 1).unwrap_err().is_out_of_space());
//! # Ok(()) }
//! ```

pub mod config;
pub mod error;
pub mod model;
pub mod packer;

pub use config::*;
pub use error::*;
pub use model::*;
pub use packer::*;

/// Convenience prelude for common types and functions.
/// Importing `binpack_core::prelude::*` brings the primary APIs into scope.
pub mod prelude {
    pub use crate::config::{
        BinConfig, BinConfigBuilder, GuillotineChoice, GuillotineSplit, MaxRectsHeuristic,
    };
    pub use crate::error::{PackError, Result};
    pub use crate::model::{BinStats, Frame, Placement, Rect};
    pub use crate::packer::Packer;
    pub use crate::packer::guillotine::GuillotineBin;
    pub use crate::packer::maxrects::{BatchOutcome, MaxRectsBin};
}
