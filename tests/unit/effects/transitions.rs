use super::*;
use crate::foundation::core::Rgba8Premul;

fn solid(r: u8, g: u8, b: u8) -> FrameRGBA {
    FrameRGBA::solid(40, 20, Rgba8Premul::from_straight_rgba(r, g, b, 255))
}

fn blend(kind: TransitionKind, p: f64) -> FrameRGBA {
    let mut dst = FrameRGBA::transparent(40, 20);
    compose_transition(kind, p, &solid(255, 0, 0), &solid(0, 0, 255), &mut dst);
    dst
}

#[test]
fn crossfade_endpoints() {
    assert_eq!(blend(TransitionKind::Crossfade, 0.0).pixel(5, 5), [255, 0, 0, 255]);
    assert_eq!(blend(TransitionKind::Crossfade, 1.0).pixel(5, 5), [0, 0, 255, 255]);
    let mid = blend(TransitionKind::Crossfade, 0.5).pixel(5, 5);
    assert!(mid[0] > 0 && mid[2] > 0);
}

#[test]
fn slide_left_enters_from_right_edge() {
    let f = blend(TransitionKind::Slide(SlideDir::Left), 0.5);
    assert_eq!(f.pixel(0, 10), [255, 0, 0, 255]);
    assert_eq!(f.pixel(39, 10), [0, 0, 255, 255]);
}

#[test]
fn slide_down_enters_from_top_edge() {
    let f = blend(TransitionKind::Slide(SlideDir::Down), 0.5);
    assert_eq!(f.pixel(20, 0), [0, 0, 255, 255]);
    assert_eq!(f.pixel(20, 19), [255, 0, 0, 255]);
}

#[test]
fn slide_finishes_fully_incoming() {
    let f = blend(TransitionKind::Slide(SlideDir::Right), 1.0);
    assert_eq!(f.pixel(0, 0), [0, 0, 255, 255]);
    assert_eq!(f.pixel(39, 19), [0, 0, 255, 255]);
}

#[test]
fn zoom_in_starts_half_size_in_centre() {
    let f = blend(TransitionKind::Zoom(ZoomDir::In), 0.0);
    assert_eq!(f.pixel(0, 0), [255, 0, 0, 255]);
    let end = blend(TransitionKind::Zoom(ZoomDir::In), 1.0);
    assert_eq!(end.pixel(0, 0), [0, 0, 255, 255]);
    assert_eq!(end.pixel(20, 10), [0, 0, 255, 255]);
}

#[test]
fn zoom_out_fades_outgoing() {
    let start = blend(TransitionKind::Zoom(ZoomDir::Out), 0.0);
    assert_eq!(start.pixel(20, 10), [255, 0, 0, 255]);
    let end = blend(TransitionKind::Zoom(ZoomDir::Out), 1.0);
    assert_eq!(end.pixel(20, 10), [0, 0, 255, 255]);
}
