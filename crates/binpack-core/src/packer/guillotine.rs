use tracing::{debug, trace};

use super::free_space::{self, guillotine_split};
use super::heuristics::{fits, guillotine_score, is_perfect_fit, split_horizontal};
use super::{Packer, validate_request};
use crate::config::{BinConfig, GuillotineChoice, GuillotineSplit, validate_dimensions};
use crate::error::{PackError, Result};
use crate::model::{BinStats, Frame, Placement, Rect, occupancy};

/// Guillotine packer: the free area is a list of pairwise disjoint rectangles, and every
/// placement cuts its host free rectangle in two with a single straight line.
#[derive(Debug, Clone)]
pub struct GuillotineBin {
    width: u32,
    height: u32,
    allow_rotation: bool,
    merge: bool,
    choice: GuillotineChoice,
    split: GuillotineSplit,
    free: Vec<Rect>,
    used: Vec<Rect>,
    overflowed: bool,
}

impl GuillotineBin {
    pub fn new(config: BinConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            width: config.width,
            height: config.height,
            allow_rotation: config.allow_rotation,
            merge: config.merge,
            choice: config.g_choice,
            split: config.g_split,
            free: vec![Rect::new(0, 0, config.width, config.height)],
            used: Vec::new(),
            overflowed: false,
        })
    }

    /// A `width x height` bin with default heuristics.
    pub fn with_size(width: u32, height: u32) -> Result<Self> {
        Self::new(BinConfig::builder().with_dimensions(width, height).build())
    }

    /// Resets to an empty `width x height` bin, keeping the configured heuristics.
    pub fn init(&mut self, width: u32, height: u32) -> Result<()> {
        validate_dimensions(width, height)?;
        debug!(width, height, "guillotine bin reset");
        self.width = width;
        self.height = height;
        self.free.clear();
        self.free.push(Rect::new(0, 0, width, height));
        self.used.clear();
        self.overflowed = false;
        Ok(())
    }

    /// Inserts a `w x h` rectangle using the configured heuristics.
    pub fn insert(&mut self, w: u32, h: u32) -> Result<Placement> {
        self.insert_with(w, h, self.merge, self.choice, self.split)
    }

    /// Inserts a `w x h` rectangle with explicit per-call heuristics.
    ///
    /// If rotation is used, the returned rectangle has width and height swapped.
    /// On `OutOfSpace` the bin is left untouched apart from the overflow flag.
    pub fn insert_with(
        &mut self,
        w: u32,
        h: u32,
        merge: bool,
        choice: GuillotineChoice,
        split: GuillotineSplit,
    ) -> Result<Placement> {
        validate_request(w, h)?;
        let Some((idx, placement)) = self.find_position(w, h, choice) else {
            if !self.overflowed {
                debug!(w, h, free = self.free.len(), "guillotine bin overflowed");
            }
            self.overflowed = true;
            return Err(PackError::OutOfSpace {
                width: w,
                height: h,
            });
        };
        self.place(idx, &placement.rect, merge, split);
        trace!(?placement, "guillotine placed");
        Ok(placement)
    }

    /// True if a `w x h` rectangle would currently fit (in any allowed orientation).
    pub fn can_fit(&self, w: u32, h: u32) -> bool {
        w > 0 && h > 0 && self.find_position(w, h, self.choice).is_some()
    }

    fn find_position(
        &self,
        w: u32,
        h: u32,
        choice: GuillotineChoice,
    ) -> Option<(usize, Placement)> {
        let mut best: Option<(usize, Placement)> = None;
        let mut best_score = i128::MAX;
        for (i, fr) in self.free.iter().enumerate() {
            // perfect fit wins immediately
            if is_perfect_fit(fr, w, h) {
                return Some((i, placement_at(fr, w, h, false)));
            }
            if self.allow_rotation && is_perfect_fit(fr, h, w) {
                return Some((i, placement_at(fr, h, w, true)));
            }
            // rotated is only scored where upright does not fit
            if fits(fr, w, h) {
                let s = guillotine_score(choice, fr, w, h);
                if best.is_none() || s < best_score {
                    best_score = s;
                    best = Some((i, placement_at(fr, w, h, false)));
                }
            } else if self.allow_rotation && fits(fr, h, w) {
                let s = guillotine_score(choice, fr, h, w);
                if best.is_none() || s < best_score {
                    best_score = s;
                    best = Some((i, placement_at(fr, h, w, true)));
                }
            }
        }
        best
    }

    fn place(&mut self, idx: usize, placed: &Rect, merge: bool, split: GuillotineSplit) {
        let fr = self.free.remove(idx);
        debug_assert!(
            self.free.iter().all(|f| !f.intersects(placed)),
            "placement {placed:?} overlaps a free rectangle"
        );
        let (bottom, right) = guillotine_split(&fr, placed, split_horizontal(split, &fr, placed));
        self.free.extend(bottom);
        self.free.extend(right);
        if merge {
            self.merge_free_list();
        }
        self.used.push(*placed);
    }

    /// Coalesces edge-sharing free rectangles. Returns the number of merges.
    pub fn merge_free_list(&mut self) -> usize {
        let merges = free_space::merge_free_list(&mut self.free);
        if merges > 0 {
            trace!(merges, free = self.free.len(), "guillotine free list merged");
        }
        merges
    }

    /// Moves a previously placed rectangle back into the free list and merges.
    ///
    /// `rect` must not overlap any current free rectangle; this only holds if the used
    /// list was not edited through [`Self::used_rects_mut`] behind the bin's back.
    /// Returns false if `rect` is not in the used list. Freed space is not
    /// re-split along the earlier cuts, so repeated releases fragment the bin.
    pub fn release(&mut self, rect: &Rect) -> bool {
        let Some(pos) = self.used.iter().position(|u| u == rect) else {
            return false;
        };
        let r = self.used.remove(pos);
        debug_assert!(
            self.free.iter().all(|f| !f.intersects(&r)),
            "released {r:?} overlaps a free rectangle"
        );
        self.free.push(r);
        self.merge_free_list();
        true
    }

    /// Fraction of the bin covered by placed rectangles.
    pub fn occupancy(&self) -> f64 {
        let used: u64 = self.used.iter().map(Rect::area).sum();
        occupancy(used, self.width, self.height)
    }

    pub fn stats(&self) -> BinStats {
        BinStats::collect(
            self.width,
            self.height,
            &self.used,
            &self.free,
            self.overflowed,
        )
    }

    /// True once any insertion has failed for lack of space. Cleared only by `init`.
    pub fn overflowed(&self) -> bool {
        self.overflowed
    }

    pub fn bin_width(&self) -> u32 {
        self.width
    }

    pub fn bin_height(&self) -> u32 {
        self.height
    }

    pub fn allow_rotation(&self) -> bool {
        self.allow_rotation
    }

    /// Disjoint rectangles covering the unused area.
    pub fn free_rects(&self) -> &[Rect] {
        &self.free
    }

    /// Rectangles placed so far, in placement order.
    pub fn used_rects(&self) -> &[Rect] {
        &self.used
    }

    /// Advanced: direct access to the free list.
    ///
    /// The caller must leave it as a set of pairwise disjoint, non-degenerate rectangles
    /// that do not overlap any used rectangle; nothing re-checks this.
    pub fn free_rects_mut(&mut self) -> &mut Vec<Rect> {
        &mut self.free
    }

    /// Advanced: direct access to the used list. See [`Self::free_rects_mut`].
    pub fn used_rects_mut(&mut self) -> &mut Vec<Rect> {
        &mut self.used
    }

    /// Checks that free rectangles are pairwise disjoint and do not overlap used ones.
    pub fn check_disjoint(&self) -> bool {
        free_space::are_disjoint(&self.free)
            && self
                .free
                .iter()
                .all(|f| self.used.iter().all(|u| !f.intersects(u)))
    }
}

fn placement_at(fr: &Rect, w: u32, h: u32, rotated: bool) -> Placement {
    Placement {
        rect: Rect::new(fr.x, fr.y, w, h),
        rotated,
    }
}

impl<K> Packer<K> for GuillotineBin {
    fn can_pack(&self, w: u32, h: u32) -> bool {
        self.can_fit(w, h)
    }

    fn pack(&mut self, key: K, w: u32, h: u32) -> Result<Frame<K>> {
        let placement = self.insert(w, h)?;
        Ok(Frame::from_placement(key, placement, w, h))
    }
}
