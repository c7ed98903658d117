//! Free-rectangle maintenance: Guillotine splitting and merging, MaxRects splitting and pruning.

use crate::model::Rect;

fn non_degenerate(r: Rect) -> Option<Rect> {
    if r.is_degenerate() { None } else { Some(r) }
}

/// Splits the L-shaped leftover of `placed` (top-left aligned in `free`) with one straight cut.
///
/// Returns the (bottom, right) remainders; degenerate ones are dropped.
pub fn guillotine_split(
    free: &Rect,
    placed: &Rect,
    split_horizontal: bool,
) -> (Option<Rect>, Option<Rect>) {
    let mut bottom = Rect::new(
        free.x,
        free.y + placed.h,
        0,
        free.h.saturating_sub(placed.h),
    );
    let mut right = Rect::new(
        free.x + placed.w,
        free.y,
        free.w.saturating_sub(placed.w),
        0,
    );
    if split_horizontal {
        bottom.w = free.w;
        right.h = placed.h;
    } else {
        bottom.w = placed.w;
        right.h = free.h;
    }
    (non_degenerate(bottom), non_degenerate(right))
}

/// Coalesces `a` and `b` if they share a full edge.
fn try_merge(a: &Rect, b: &Rect) -> Option<Rect> {
    if a.x == b.x && a.w == b.w {
        if a.bottom_ex() == b.y {
            return Some(Rect::new(a.x, a.y, a.w, a.h + b.h));
        }
        if b.bottom_ex() == a.y {
            return Some(Rect::new(a.x, b.y, a.w, a.h + b.h));
        }
    }
    if a.y == b.y && a.h == b.h {
        if a.right_ex() == b.x {
            return Some(Rect::new(a.x, a.y, a.w + b.w, a.h));
        }
        if b.right_ex() == a.x {
            return Some(Rect::new(b.x, a.y, a.w + b.w, a.h));
        }
    }
    None
}

/// Merges edge-sharing free rectangles until no pair can be merged.
///
/// After a merge the enlarged rectangle is compared against every later entry again.
/// Passes repeat until stable, so chains of three or more also collapse. The union
/// of the list never changes. Returns the number of merges performed.
pub fn merge_free_list(free: &mut Vec<Rect>) -> usize {
    let mut merges = 0;
    loop {
        let before = merges;
        let mut i = 0;
        while i < free.len() {
            let mut j = i + 1;
            while j < free.len() {
                if let Some(merged) = try_merge(&free[i], &free[j]) {
                    free[i] = merged;
                    free.remove(j);
                    merges += 1;
                    j = i + 1;
                } else {
                    j += 1;
                }
            }
            i += 1;
        }
        if merges == before {
            return merges;
        }
    }
}

/// Pushes the maximal remainders of `free` minus `used` into `out`.
///
/// Each remainder spans the full extent of `free` on the axis it does not cut.
/// Returns false (and pushes nothing) if the two do not intersect.
pub fn maxrects_split(free: &Rect, used: &Rect, out: &mut Vec<Rect>) -> bool {
    if !free.intersects(used) {
        return false;
    }

    // top
    if used.y > free.y && used.y < free.bottom_ex() {
        out.push(Rect::new(free.x, free.y, free.w, used.y - free.y));
    }
    // bottom
    if used.bottom_ex() < free.bottom_ex() {
        out.push(Rect::new(
            free.x,
            used.bottom_ex(),
            free.w,
            free.bottom_ex() - used.bottom_ex(),
        ));
    }
    // left
    if used.x > free.x && used.x < free.right_ex() {
        out.push(Rect::new(free.x, free.y, used.x - free.x, free.h));
    }
    // right
    if used.right_ex() < free.right_ex() {
        out.push(Rect::new(
            used.right_ex(),
            free.y,
            free.right_ex() - used.right_ex(),
            free.h,
        ));
    }
    true
}

/// Removes every rectangle contained in another member. Of two equal rectangles the
/// later one survives. Returns the number removed.
pub fn prune_contained(free: &mut Vec<Rect>) -> usize {
    let mut removed = 0;
    let mut i = 0;
    while i < free.len() {
        let mut j = i + 1;
        let mut remove_i = false;
        while j < free.len() {
            if free[j].contains(&free[i]) {
                remove_i = true;
                break;
            }
            if free[i].contains(&free[j]) {
                free.remove(j);
                removed += 1;
            } else {
                j += 1;
            }
        }
        if remove_i {
            free.remove(i);
            removed += 1;
        } else {
            i += 1;
        }
    }
    removed
}

/// True if no two rectangles overlap.
pub fn are_disjoint(rects: &[Rect]) -> bool {
    rects
        .iter()
        .enumerate()
        .all(|(i, a)| rects[i + 1..].iter().all(|b| !a.intersects(b)))
}

/// True if no rectangle lies inside another.
pub fn is_containment_free(rects: &[Rect]) -> bool {
    rects.iter().enumerate().all(|(i, a)| {
        rects
            .iter()
            .enumerate()
            .all(|(j, b)| i == j || !b.contains(a))
    })
}
