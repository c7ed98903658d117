//! Placement scoring shared by both engines.
//!
//! Every function here is pure: it looks at a candidate size and a free rectangle
//! (plus, for contact scoring, the bin border and the placed rectangles) and returns
//! a comparable score. Smaller scores are better throughout.

use crate::config::{GuillotineChoice, GuillotineSplit, MaxRectsHeuristic};
use crate::model::{Rect, common_interval_length};

/// Leftover measurements for placing a `w x h` rectangle at the top-left of a free rect.
///
/// Kept in `i128`: a full `u32` bin has an area above `i64::MAX`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Leftover {
    /// `min(|free.w - w|, |free.h - h|)`
    pub short_side: i128,
    /// `max(|free.w - w|, |free.h - h|)`
    pub long_side: i128,
    /// `free.area - w * h`
    pub area: i128,
}

impl Leftover {
    pub fn of(free: &Rect, w: u32, h: u32) -> Self {
        let leftover_h = (free.w as i128 - w as i128).abs();
        let leftover_v = (free.h as i128 - h as i128).abs();
        Self {
            short_side: leftover_h.min(leftover_v),
            long_side: leftover_h.max(leftover_v),
            area: free.area() as i128 - w as i128 * h as i128,
        }
    }
}

/// True if `w x h` fits upright in `free`.
pub fn fits(free: &Rect, w: u32, h: u32) -> bool {
    w <= free.w && h <= free.h
}

/// True if `w x h` exactly fills `free` upright.
pub fn is_perfect_fit(free: &Rect, w: u32, h: u32) -> bool {
    w == free.w && h == free.h
}

/// Guillotine free-rect choice score.
pub fn guillotine_score(choice: GuillotineChoice, free: &Rect, w: u32, h: u32) -> i128 {
    let fit = Leftover::of(free, w, h);
    match choice {
        GuillotineChoice::BestAreaFit => fit.area,
        GuillotineChoice::BestShortSideFit => fit.short_side,
        GuillotineChoice::BestLongSideFit => fit.long_side,
        GuillotineChoice::WorstAreaFit => -fit.area,
        GuillotineChoice::WorstShortSideFit => -fit.short_side,
        GuillotineChoice::WorstLongSideFit => -fit.long_side,
    }
}

/// Decides the cut direction for the L-shaped leftover of `placed` inside `free`.
///
/// `placed` must sit at the top-left corner of `free`. Returns true for a horizontal cut,
/// which gives the bottom remainder the full free width.
pub fn split_horizontal(split: GuillotineSplit, free: &Rect, placed: &Rect) -> bool {
    let leftover_w = free.w.saturating_sub(placed.w) as u64;
    let leftover_h = free.h.saturating_sub(placed.h) as u64;
    match split {
        GuillotineSplit::SplitShorterLeftoverAxis => leftover_w <= leftover_h,
        GuillotineSplit::SplitLongerLeftoverAxis => leftover_w > leftover_h,
        GuillotineSplit::SplitMinimizeArea => {
            placed.w as u64 * leftover_h > leftover_w * placed.h as u64
        }
        GuillotineSplit::SplitMaximizeArea => {
            placed.w as u64 * leftover_h <= leftover_w * placed.h as u64
        }
        GuillotineSplit::SplitShorterAxis => free.w <= free.h,
        GuillotineSplit::SplitLongerAxis => free.w > free.h,
    }
}

/// Two-level MaxRects score; `secondary` breaks ties on `primary`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Score {
    pub primary: i128,
    pub secondary: i128,
}

impl Score {
    pub const WORST: Score = Score {
        primary: i128::MAX,
        secondary: i128::MAX,
    };

    pub fn new(primary: i128, secondary: i128) -> Self {
        Self { primary, secondary }
    }
}

/// Everything outside the candidate/free pair that a MaxRects heuristic may look at.
#[derive(Debug, Clone, Copy)]
pub struct BinView<'a> {
    pub bin_width: u32,
    pub bin_height: u32,
    pub used: &'a [Rect],
}

/// MaxRects score for placing `w x h` at the top-left of `free`.
pub fn maxrects_score(
    heuristic: MaxRectsHeuristic,
    bin: &BinView<'_>,
    free: &Rect,
    w: u32,
    h: u32,
) -> Score {
    let fit = Leftover::of(free, w, h);
    match heuristic {
        MaxRectsHeuristic::BestShortSideFit => Score::new(fit.short_side, fit.long_side),
        MaxRectsHeuristic::BestLongSideFit => Score::new(fit.long_side, fit.short_side),
        MaxRectsHeuristic::BestAreaFit => Score::new(fit.area, fit.short_side),
        MaxRectsHeuristic::BottomLeft => {
            Score::new(free.y as i128 + h as i128, free.x as i128)
        }
        MaxRectsHeuristic::ContactPoint => {
            // bigger contact is better; negate for minimization
            let contact = contact_point_score(bin, &Rect::new(free.x, free.y, w, h));
            Score::new(-(contact as i128), 0)
        }
    }
}

/// Total edge length of `node` touching the bin border or a placed rectangle.
pub fn contact_point_score(bin: &BinView<'_>, node: &Rect) -> u64 {
    let mut score = 0u64;
    if node.x == 0 || node.right_ex() == bin.bin_width {
        score += node.h as u64;
    }
    if node.y == 0 || node.bottom_ex() == bin.bin_height {
        score += node.w as u64;
    }

    for u in bin.used {
        // left/right edges flush
        if u.x == node.right_ex() || u.right_ex() == node.x {
            score += common_interval_length(u.y, u.bottom_ex(), node.y, node.bottom_ex()) as u64;
        }
        // top/bottom edges flush
        if u.y == node.bottom_ex() || u.bottom_ex() == node.y {
            score += common_interval_length(u.x, u.right_ex(), node.x, node.right_ex()) as u64;
        }
    }
    score
}
