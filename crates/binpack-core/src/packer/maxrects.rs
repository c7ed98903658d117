use tracing::{debug, instrument, trace};

use super::free_space::{self, maxrects_split, prune_contained};
use super::heuristics::{BinView, Score, fits, maxrects_score};
use super::{Packer, validate_request};
use crate::config::{BinConfig, MaxRectsHeuristic, validate_dimensions};
use crate::error::{PackError, Result};
use crate::model::{BinStats, Frame, Placement, Rect, occupancy};

/// MaxRects packer: the free area is tracked as maximal rectangles that may overlap.
/// No free rectangle is ever contained in another one after an insertion.
#[derive(Debug, Clone)]
pub struct MaxRectsBin {
    width: u32,
    height: u32,
    allow_rotation: bool,
    heuristic: MaxRectsHeuristic,
    free: Vec<Rect>,
    used: Vec<Rect>,
    overflowed: bool,
}

/// Result of [`MaxRectsBin::insert_batch`].
#[derive(Debug, Clone)]
pub struct BatchOutcome<K> {
    /// Placed items, in placement order (not input order).
    pub placed: Vec<Frame<K>>,
    /// Items that fit nowhere once the bin filled up, as `(key, w, h)`.
    pub unplaced: Vec<(K, u32, u32)>,
}

impl<K> BatchOutcome<K> {
    pub fn is_complete(&self) -> bool {
        self.unplaced.is_empty()
    }
}

impl MaxRectsBin {
    pub fn new(config: BinConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            width: config.width,
            height: config.height,
            allow_rotation: config.allow_rotation,
            heuristic: config.mr_heuristic,
            free: vec![Rect::new(0, 0, config.width, config.height)],
            used: Vec::new(),
            overflowed: false,
        })
    }

    /// A `width x height` bin with default heuristics.
    pub fn with_size(width: u32, height: u32) -> Result<Self> {
        Self::new(BinConfig::builder().with_dimensions(width, height).build())
    }

    /// Resets to an empty `width x height` bin, keeping the configured heuristic.
    pub fn init(&mut self, width: u32, height: u32) -> Result<()> {
        validate_dimensions(width, height)?;
        debug!(width, height, "maxrects bin reset");
        self.width = width;
        self.height = height;
        self.free.clear();
        self.free.push(Rect::new(0, 0, width, height));
        self.used.clear();
        self.overflowed = false;
        Ok(())
    }

    /// Inserts a `w x h` rectangle using the configured heuristic.
    pub fn insert(&mut self, w: u32, h: u32) -> Result<Placement> {
        self.insert_with(w, h, self.heuristic)
    }

    /// Inserts a `w x h` rectangle with an explicit heuristic.
    ///
    /// On `OutOfSpace` the bin is left untouched apart from the overflow flag.
    pub fn insert_with(
        &mut self,
        w: u32,
        h: u32,
        heuristic: MaxRectsHeuristic,
    ) -> Result<Placement> {
        validate_request(w, h)?;
        let Some((placement, _)) = self.find_position(w, h, heuristic) else {
            if !self.overflowed {
                debug!(w, h, free = self.free.len(), "maxrects bin overflowed");
            }
            self.overflowed = true;
            return Err(PackError::OutOfSpace {
                width: w,
                height: h,
            });
        };
        self.place_rect(&placement.rect);
        trace!(?placement, "maxrects placed");
        Ok(placement)
    }

    /// Packs `items` greedily: each round places the single (item, free rect, orientation)
    /// with the best score across everything still pending, then rescores.
    ///
    /// Stops when nothing left fits. Sets the overflow flag if any item remains unplaced.
    /// Fails without touching the bin if any item has a zero side.
    pub fn insert_batch<K>(&mut self, items: Vec<(K, u32, u32)>) -> Result<BatchOutcome<K>> {
        self.insert_batch_with(items, self.heuristic)
    }

    #[instrument(skip_all, fields(count = items.len(), heuristic = ?heuristic))]
    pub fn insert_batch_with<K>(
        &mut self,
        items: Vec<(K, u32, u32)>,
        heuristic: MaxRectsHeuristic,
    ) -> Result<BatchOutcome<K>> {
        for (_, w, h) in &items {
            validate_request(*w, *h)?;
        }

        let mut pending = items;
        let mut placed = Vec::with_capacity(pending.len());
        while !pending.is_empty() {
            let mut best: Option<(usize, Placement)> = None;
            let mut best_score = Score::WORST;
            for (i, (_, w, h)) in pending.iter().enumerate() {
                if let Some((p, s)) = self.find_position(*w, *h, heuristic) {
                    if best.is_none() || s < best_score {
                        best_score = s;
                        best = Some((i, p));
                    }
                }
            }
            let Some((i, placement)) = best else {
                break;
            };
            self.place_rect(&placement.rect);
            let (key, w, h) = pending.remove(i);
            placed.push(Frame::from_placement(key, placement, w, h));
        }

        if !pending.is_empty() {
            debug!(
                placed = placed.len(),
                unplaced = pending.len(),
                "maxrects batch overflowed"
            );
            self.overflowed = true;
        }
        Ok(BatchOutcome {
            placed,
            unplaced: pending,
        })
    }

    /// True if a `w x h` rectangle would currently fit (in any allowed orientation).
    pub fn can_fit(&self, w: u32, h: u32) -> bool {
        w > 0 && h > 0 && self.find_position(w, h, self.heuristic).is_some()
    }

    fn find_position(
        &self,
        w: u32,
        h: u32,
        heuristic: MaxRectsHeuristic,
    ) -> Option<(Placement, Score)> {
        let view = BinView {
            bin_width: self.width,
            bin_height: self.height,
            used: &self.used,
        };
        let mut best: Option<Placement> = None;
        let mut best_score = Score::WORST;
        for fr in &self.free {
            if fits(fr, w, h) {
                let s = maxrects_score(heuristic, &view, fr, w, h);
                if best.is_none() || s < best_score {
                    best_score = s;
                    best = Some(Placement {
                        rect: Rect::new(fr.x, fr.y, w, h),
                        rotated: false,
                    });
                }
            }
            if self.allow_rotation && fits(fr, h, w) {
                let s = maxrects_score(heuristic, &view, fr, h, w);
                if best.is_none() || s < best_score {
                    best_score = s;
                    best = Some(Placement {
                        rect: Rect::new(fr.x, fr.y, h, w),
                        rotated: true,
                    });
                }
            }
        }
        best.map(|p| (p, best_score))
    }

    fn place_rect(&mut self, node: &Rect) {
        // Only free rects present before this placement get split.
        let mut remainders = Vec::new();
        self.free.retain(|fr| !maxrects_split(fr, node, &mut remainders));
        self.free.extend(remainders);

        let pruned = prune_contained(&mut self.free);
        trace!(pruned, free = self.free.len(), "maxrects free list pruned");
        self.used.push(*node);
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

    /// Maximal free rectangles. They may overlap each other.
    pub fn free_rects(&self) -> &[Rect] {
        &self.free
    }

    /// Rectangles placed so far, in placement order.
    pub fn used_rects(&self) -> &[Rect] {
        &self.used
    }

    /// Advanced: direct access to the free list.
    ///
    /// The caller must keep every entry non-degenerate, outside all used rectangles and
    /// not contained in another entry; nothing re-checks this.
    pub fn free_rects_mut(&mut self) -> &mut Vec<Rect> {
        &mut self.free
    }

    /// Advanced: direct access to the used list. Also feeds `ContactPoint` scoring.
    pub fn used_rects_mut(&mut self) -> &mut Vec<Rect> {
        &mut self.used
    }

    /// Checks that no free rectangle is contained in another.
    pub fn check_containment_free(&self) -> bool {
        free_space::is_containment_free(&self.free)
    }
}

impl<K> Packer<K> for MaxRectsBin {
    fn can_pack(&self, w: u32, h: u32) -> bool {
        self.can_fit(w, h)
    }

    fn pack(&mut self, key: K, w: u32, h: u32) -> Result<Frame<K>> {
        let placement = self.insert(w, h)?;
        Ok(Frame::from_placement(key, placement, w, h))
    }
}
