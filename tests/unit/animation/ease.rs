use super::*;

const ALL: [Ease; 8] = [
    Ease::Linear,
    Ease::InOutCubic,
    Ease::InOutQuad,
    Ease::OutCubic,
    Ease::InCubic,
    Ease::OutExpo,
    Ease::InOutSine,
    Ease::OutBack,
];

#[test]
fn every_curve_hits_endpoints() {
    for e in ALL {
        assert!(e.apply(0.0).abs() < 1e-9, "{e:?} at 0");
        assert!((e.apply(1.0) - 1.0).abs() < 1e-9, "{e:?} at 1");
    }
}

#[test]
fn input_is_clamped() {
    for e in ALL {
        assert_eq!(e.apply(-3.0), e.apply(0.0));
        assert_eq!(e.apply(7.0), e.apply(1.0));
    }
}

#[test]
fn curves_are_monotonic_except_out_back() {
    for e in ALL.into_iter().filter(|e| *e != Ease::OutBack) {
        let mut prev = e.apply(0.0);
        for i in 1..=200 {
            let v = e.apply(f64::from(i) / 200.0);
            assert!(v + 1e-12 >= prev, "{e:?} decreased at step {i}");
            prev = v;
        }
    }
}

#[test]
fn out_back_overshoots() {
    let peak = (0..=100)
        .map(|i| Ease::OutBack.apply(f64::from(i) / 100.0))
        .fold(f64::MIN, f64::max);
    assert!(peak > 1.0);
}

#[test]
fn presets_map_to_documented_curves() {
    assert_eq!(EasePreset::Motion.ease(), Ease::InOutCubic);
    assert_eq!(EasePreset::Zoom.ease(), Ease::InOutSine);
    assert_eq!(EasePreset::Text.ease(), Ease::OutCubic);
    assert_eq!(EasePreset::Transition.ease(), Ease::InOutQuad);
    assert_eq!(EasePreset::Dynamic.ease(), Ease::OutBack);
}

#[test]
fn unknown_preset_falls_back_to_in_out_cubic() {
    assert_eq!(Ease::from_preset_name("wobbly"), Ease::InOutCubic);
    assert_eq!(Ease::from_preset_name("Transition"), Ease::InOutQuad);
    assert_eq!(Ease::from_preset_name("ease_out_expo"), Ease::OutExpo);
    assert_eq!(Ease::from_preset_name("linear"), Ease::Linear);
}

#[test]
fn curve_names_resolve_to_their_curve() {
    for e in ALL {
        assert_eq!(Ease::from_curve_name(e.curve_name()), Some(e));
    }
}
