use super::*;

#[test]
fn rationals_parse() {
    assert_eq!(parse_rational("30/1"), Some(30.0));
    assert!((parse_rational("30000/1001").unwrap() - 29.97).abs() < 1e-2);
    assert_eq!(parse_rational("25"), Some(25.0));
    assert_eq!(parse_rational("0/0"), None);
    assert_eq!(parse_rational("abc"), None);
}

#[test]
fn pcm_length_helpers() {
    let pcm = AudioPcm {
        sample_rate: MIX_SAMPLE_RATE,
        channels: 2,
        interleaved_f32: vec![0.0; 96_000],
    };
    assert_eq!(pcm.frames(), 48_000);
    assert!((pcm.duration_sec() - 1.0).abs() < 1e-12);
}
