use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle in bin-local units. `x,y` is top-left; `w,h` are sizes.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

impl Rect {
    pub fn new(x: u32, y: u32, w: u32, h: u32) -> Self {
        Self { x, y, w, h }
    }

    pub fn area(&self) -> u64 {
        self.w as u64 * self.h as u64
    }

    /// A rectangle with no extent on either axis. Never stored in a free list.
    pub fn is_degenerate(&self) -> bool {
        self.w == 0 || self.h == 0
    }

    /// Exclusive right edge (`x + w`).
    pub fn right_ex(&self) -> u32 {
        self.x + self.w
    }

    /// Exclusive bottom edge (`y + h`).
    pub fn bottom_ex(&self) -> u32 {
        self.y + self.h
    }

    /// Returns true if `r` lies fully inside `self`. Equal rectangles contain each other.
    pub fn contains(&self, r: &Rect) -> bool {
        r.x >= self.x
            && r.y >= self.y
            && r.right_ex() <= self.right_ex()
            && r.bottom_ex() <= self.bottom_ex()
    }

    /// Separating-axis overlap test. Rectangles that only share an edge do not intersect.
    pub fn intersects(&self, other: &Rect) -> bool {
        !(self.x >= other.right_ex()
            || other.x >= self.right_ex()
            || self.y >= other.bottom_ex()
            || other.y >= self.bottom_ex())
    }
}

/// Length of the overlap of `[a_start, a_end]` and `[b_start, b_end]`, zero when disjoint.
pub fn common_interval_length(a_start: u32, a_end: u32, b_start: u32, b_end: u32) -> u32 {
    if a_end < b_start || b_end < a_start {
        return 0;
    }
    a_end.min(b_end) - a_start.max(b_start)
}

/// Where a rectangle ended up. `rect` carries post-rotation width/height.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Placement {
    pub rect: Rect,
    /// True if width and height were swapped relative to the request.
    pub rotated: bool,
}

/// A placement tagged with the caller's key.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Frame<K = String> {
    /// User-specified key identifying the input item.
    pub key: K,
    /// Placed rectangle within the bin (post-rotation width/height).
    pub frame: Rect,
    /// True if the item was rotated 90° when placed.
    pub rotated: bool,
    /// Requested size, before any rotation.
    pub source_size: (u32, u32),
}

impl<K> Frame<K> {
    pub(crate) fn from_placement(key: K, placement: Placement, w: u32, h: u32) -> Self {
        Self {
            key,
            frame: placement.rect,
            rotated: placement.rotated,
            source_size: (w, h),
        }
    }
}

/// Snapshot statistics for a single bin.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct BinStats {
    pub bin_width: u32,
    pub bin_height: u32,
    /// Number of placed rectangles.
    pub num_used: usize,
    /// Number of tracked free rectangles.
    pub num_free: usize,
    /// Sum of placed rectangle areas.
    pub used_area: u64,
    /// Sum of free rectangle areas. Equals `bin_area - used_area` for Guillotine;
    /// MaxRects free rectangles overlap, so there it over-counts.
    pub free_area: u64,
    /// used_area / bin_area (0.0 to 1.0).
    pub occupancy: f64,
    /// True once any insertion has failed for lack of space.
    pub overflowed: bool,
}

impl BinStats {
    pub(crate) fn collect(
        bin_width: u32,
        bin_height: u32,
        used: &[Rect],
        free: &[Rect],
        overflowed: bool,
    ) -> Self {
        let used_area: u64 = used.iter().map(Rect::area).sum();
        let free_area: u64 = free.iter().map(Rect::area).sum();
        Self {
            bin_width,
            bin_height,
            num_used: used.len(),
            num_free: free.len(),
            used_area,
            free_area,
            occupancy: occupancy(used_area, bin_width, bin_height),
            overflowed,
        }
    }

    pub fn bin_area(&self) -> u64 {
        self.bin_width as u64 * self.bin_height as u64
    }

    /// Unused bin area.
    pub fn wasted_area(&self) -> u64 {
        self.bin_area().saturating_sub(self.used_area)
    }

    /// Returns a human-readable summary of the statistics.
    pub fn summary(&self) -> String {
        format!(
            "Bin: {}x{}, Placed: {}, Free rects: {}, Occupancy: {:.2}%, Used Area: {}, Wasted Area: {}, Overflow: {}",
            self.bin_width,
            self.bin_height,
            self.num_used,
            self.num_free,
            self.occupancy * 100.0,
            self.used_area,
            self.wasted_area(),
            self.overflowed,
        )
    }
}

pub(crate) fn occupancy(used_area: u64, bin_width: u32, bin_height: u32) -> f64 {
    let bin_area = bin_width as u64 * bin_height as u64;
    if bin_area > 0 {
        used_area as f64 / bin_area as f64
    } else {
        0.0
    }
}
