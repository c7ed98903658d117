use binpack_core::config::{BinConfig, MaxRectsHeuristic};
use binpack_core::packer::Packer;
use binpack_core::packer::maxrects::MaxRectsBin;

#[test]
fn maxrects_rotates_when_only_rotated_fits() {
    for heuristic in MaxRectsHeuristic::ALL {
        let cfg = BinConfig::builder()
            .with_dimensions(16, 12)
            .allow_rotation(true)
            .mr_heuristic(heuristic)
            .build();

        let mut p = MaxRectsBin::new(cfg).expect("valid bin");
        let f = <MaxRectsBin as Packer<String>>::pack(&mut p, "R".into(), 8, 14)
            .expect("rotated fit should succeed");
        assert!(f.rotated, "{heuristic:?} should rotate because only rotated fits");
        assert_eq!(f.frame.w, 14);
        assert_eq!(f.frame.h, 8);
    }
}

#[test]
fn maxrects_respects_disabled_rotation() {
    let cfg = BinConfig::builder()
        .with_dimensions(16, 12)
        .allow_rotation(false)
        .build();

    let mut p = MaxRectsBin::new(cfg).expect("valid bin");
    assert!(!p.can_fit(8, 14));
    assert!(p.insert(8, 14).expect_err("no fit").is_out_of_space());
    assert!(p.overflowed());
    assert_eq!(p.free_rects().len(), 1);
}
