use super::*;

#[test]
fn endpoints_are_stable() {
    for ease in Ease::ALL {
        assert_eq!(ease.apply(0.0), 0.0, "{ease:?}");
        assert_eq!(ease.apply(1.0), 1.0, "{ease:?}");
    }
}

#[test]
fn inputs_are_clamped() {
    for ease in Ease::ALL {
        assert_eq!(ease.apply(-3.0), 0.0);
        assert_eq!(ease.apply(7.0), 1.0);
    }
}

#[test]
fn monotonic_spot_check() {
    for ease in Ease::ALL.into_iter().filter(|e| e.is_monotonic()) {
        let a = ease.apply(0.25);
        let b = ease.apply(0.5);
        let c = ease.apply(0.75);
        assert!(a < b, "{ease:?}");
        assert!(b < c, "{ease:?}");
    }
}

#[test]
fn out_back_overshoots_then_settles() {
    let mid = Ease::OutBack.apply(0.6);
    assert!(mid > 1.0);
    assert!((Ease::OutBack.apply(0.999) - 1.0).abs() < 1e-3);
}

#[test]
fn out_cubic_matches_closed_form() {
    let t: f64 = 0.3;
    assert!((Ease::OutCubic.apply(t) - (1.0 - 0.7f64.powi(3))).abs() < 1e-12);
}
