use binpack_core::prelude::*;

fn bin(w: u32, h: u32, choice: GuillotineChoice, split: GuillotineSplit) -> GuillotineBin {
    let cfg = BinConfig::builder()
        .with_dimensions(w, h)
        .g_choice(choice)
        .g_split(split)
        .build();
    GuillotineBin::new(cfg).expect("valid bin")
}

#[test]
fn fills_bin_exactly_then_overflows() {
    let mut b = bin(
        10,
        10,
        GuillotineChoice::BestAreaFit,
        GuillotineSplit::SplitShorterAxis,
    );

    let a = b.insert(6, 10).expect("first fits");
    assert_eq!(a.rect, Rect::new(0, 0, 6, 10));
    assert!(!a.rotated);

    let c = b.insert(4, 10).expect("second fits");
    assert_eq!(c.rect, Rect::new(6, 0, 4, 10));
    assert_eq!(b.occupancy(), 1.0);
    assert!(b.free_rects().is_empty());

    match b.insert(1, 1) {
        Err(PackError::OutOfSpace { width, height }) => {
            assert_eq!((width, height), (1, 1));
        }
        other => panic!("Expected OutOfSpace, got {other:?}"),
    }
    assert!(b.overflowed());
}

#[test]
fn second_square_overflows_without_rotation() {
    let cfg = BinConfig::builder()
        .with_dimensions(5, 5)
        .allow_rotation(false)
        .build();
    let mut b = GuillotineBin::new(cfg).expect("valid bin");

    b.insert(3, 3).expect("first fits");
    assert!(b.insert(3, 3).expect_err("second overflows").is_out_of_space());
    assert!((b.occupancy() - 9.0 / 25.0).abs() < 1e-9);
    assert_eq!(b.used_rects().len(), 1);
}

/// Free rect 10x6 with a 4x2 placement leaves 6 to the right and 4 below.
fn split_after_first_insert(split: GuillotineSplit) -> Vec<Rect> {
    let cfg = BinConfig::builder()
        .with_dimensions(10, 6)
        .allow_rotation(false)
        .merge(false)
        .g_split(split)
        .build();
    let mut b = GuillotineBin::new(cfg).expect("valid bin");
    b.insert(4, 2).expect("fits");
    b.free_rects().to_vec()
}

#[test]
fn split_heuristics_pick_the_expected_cut() {
    let horizontal = vec![Rect::new(0, 2, 10, 4), Rect::new(4, 0, 6, 2)];
    let vertical = vec![Rect::new(0, 2, 4, 4), Rect::new(4, 0, 6, 6)];

    let cases = [
        (GuillotineSplit::SplitShorterLeftoverAxis, &vertical),
        (GuillotineSplit::SplitLongerLeftoverAxis, &horizontal),
        (GuillotineSplit::SplitMinimizeArea, &horizontal),
        (GuillotineSplit::SplitMaximizeArea, &vertical),
        (GuillotineSplit::SplitShorterAxis, &vertical),
        (GuillotineSplit::SplitLongerAxis, &horizontal),
    ];
    for (split, expected) in cases {
        assert_eq!(&split_after_first_insert(split), expected, "{split:?}");
    }
}

#[test]
fn degenerate_remainders_are_dropped() {
    let cfg = BinConfig::builder()
        .with_dimensions(8, 4)
        .allow_rotation(false)
        .merge(false)
        .build();
    let mut b = GuillotineBin::new(cfg).expect("valid bin");
    b.insert(8, 1).expect("fits");
    assert_eq!(b.free_rects(), &[Rect::new(0, 1, 8, 3)]);
}

#[test]
fn choice_heuristic_selects_smallest_or_largest_host() {
    let free = vec![Rect::new(0, 0, 3, 3), Rect::new(3, 0, 7, 10)];

    let mut best = bin(
        10,
        10,
        GuillotineChoice::BestAreaFit,
        GuillotineSplit::SplitShorterLeftoverAxis,
    );
    *best.free_rects_mut() = free.clone();
    assert_eq!(best.insert(2, 2).expect("fits").rect, Rect::new(0, 0, 2, 2));

    let mut worst = bin(
        10,
        10,
        GuillotineChoice::WorstAreaFit,
        GuillotineSplit::SplitShorterLeftoverAxis,
    );
    *worst.free_rects_mut() = free;
    assert_eq!(worst.insert(2, 2).expect("fits").rect, Rect::new(3, 0, 2, 2));
}

#[test]
fn merge_pass_coalesces_chains() {
    let mut b = GuillotineBin::with_size(10, 10).expect("valid bin");
    *b.free_rects_mut() = vec![
        Rect::new(0, 0, 5, 10),
        Rect::new(5, 0, 5, 5),
        Rect::new(5, 5, 5, 5),
    ];
    assert_eq!(b.merge_free_list(), 2);
    assert_eq!(b.free_rects(), &[Rect::new(0, 0, 10, 10)]);
}

#[test]
fn merge_requires_a_full_shared_edge() {
    let mut b = GuillotineBin::with_size(10, 10).expect("valid bin");
    *b.free_rects_mut() = vec![Rect::new(0, 0, 5, 4), Rect::new(5, 0, 5, 6)];
    assert_eq!(b.merge_free_list(), 0);
    assert_eq!(b.free_rects().len(), 2);
}

#[test]
fn insert_with_overrides_configured_heuristics() {
    let mut b = GuillotineBin::with_size(10, 6).expect("valid bin");
    b.insert_with(
        4,
        2,
        false,
        GuillotineChoice::BestAreaFit,
        GuillotineSplit::SplitLongerAxis,
    )
    .expect("fits");
    assert_eq!(
        b.free_rects(),
        &[Rect::new(0, 2, 10, 4), Rect::new(4, 0, 6, 2)]
    );
}

#[test]
fn release_returns_space_and_merges() {
    let mut b = GuillotineBin::with_size(10, 10).expect("valid bin");
    let p = b.insert(6, 10).expect("fits");
    assert!(b.release(&p.rect));
    assert!(b.used_rects().is_empty());
    assert_eq!(b.free_rects(), &[Rect::new(0, 0, 10, 10)]);
    assert_eq!(b.occupancy(), 0.0);
    assert!(!b.release(&p.rect), "already released");
}

#[test]
fn init_resets_state_and_overflow() {
    let mut b = GuillotineBin::with_size(4, 4).expect("valid bin");
    b.insert(4, 4).expect("fits");
    assert!(b.insert(1, 1).is_err());
    assert!(b.overflowed());

    b.init(8, 2).expect("valid size");
    assert!(!b.overflowed());
    assert_eq!((b.bin_width(), b.bin_height()), (8, 2));
    assert!(b.used_rects().is_empty());
    assert_eq!(b.free_rects(), &[Rect::new(0, 0, 8, 2)]);
    assert_eq!(b.occupancy(), 0.0);
}

#[test]
fn stats_report_partition() {
    let mut b = GuillotineBin::with_size(10, 10).expect("valid bin");
    b.insert(3, 7).expect("fits");
    b.insert(5, 2).expect("fits");
    let stats = b.stats();
    assert_eq!(stats.num_used, 2);
    assert_eq!(stats.used_area, 31);
    assert_eq!(stats.free_area, 69);
    assert_eq!(stats.wasted_area(), 69);
    assert!(!stats.overflowed);
    assert!(stats.summary().contains("Placed: 2"));
}

#[test]
fn area_scores_hold_on_a_full_u32_bin() {
    let huge = Rect::new(0, 10, u32::MAX, u32::MAX - 10);
    let small = Rect::new(0, 0, 10, 10);

    let mut best = bin(
        u32::MAX,
        u32::MAX,
        GuillotineChoice::BestAreaFit,
        GuillotineSplit::SplitShorterLeftoverAxis,
    );
    *best.free_rects_mut() = vec![huge, small];
    assert_eq!(best.insert(5, 5).expect("fits").rect, Rect::new(0, 0, 5, 5));

    let mut worst = bin(
        u32::MAX,
        u32::MAX,
        GuillotineChoice::WorstAreaFit,
        GuillotineSplit::SplitShorterLeftoverAxis,
    );
    *worst.free_rects_mut() = vec![small, huge];
    assert_eq!(worst.insert(5, 5).expect("fits").rect, Rect::new(0, 10, 5, 5));
}

#[test]
#[cfg(debug_assertions)]
#[should_panic(expected = "overlaps a free rectangle")]
fn release_of_rect_overlapping_free_space_panics() {
    let mut b = GuillotineBin::with_size(10, 10).expect("valid bin");
    b.insert(6, 10).expect("fits");
    // the right strip is still free
    b.used_rects_mut().push(Rect::new(6, 0, 4, 10));
    b.release(&Rect::new(6, 0, 4, 10));
}
