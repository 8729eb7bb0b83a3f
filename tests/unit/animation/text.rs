use super::*;
use crate::foundation::core::Rgba8Premul;

const CANVAS: Canvas = Canvas {
    width: 200,
    height: 100,
};

fn white_block() -> Arc<FrameRGBA> {
    Arc::new(FrameRGBA::solid(
        100,
        10,
        Rgba8Premul::from_straight_rgba(255, 255, 255, 255),
    ))
}

fn anim(kind: AnimationKind, start_time: f64) -> TextAnimation {
    TextAnimation::new(
        white_block(),
        AnimationSpec { kind },
        Position::center(),
        start_time,
        4.0,
        CANVAS,
        Fps::integer(10).unwrap(),
    )
}

#[test]
fn frame_count_covers_scene() {
    let a = anim(AnimationKind::Fade, 0.0);
    assert_eq!(a.frame_count(), 40);
    assert_eq!(a.frames().len(), 40);
    assert_eq!(a.frames().count(), 40);
}

#[test]
fn blank_before_start_then_steady() {
    let a = anim(AnimationKind::Fade, 1.0);
    assert!(a.pose(9).is_none());
    assert!(a.frame(9).is_fully_transparent());
    // 0.8 s at 10 fps: frames 10..18 animate
    let steady = a.pose(18).unwrap();
    assert_eq!((steady.x, steady.y, steady.opacity), (50.0, 45.0, 1.0));
    assert_eq!(a.frame(30).pixel(100, 50), [255, 255, 255, 255]);
}

#[test]
fn fade_opacity_is_linear() {
    let a = anim(AnimationKind::Fade, 0.0);
    assert_eq!(a.pose(0).unwrap().opacity, 0.0);
    assert!((a.pose(4).unwrap().opacity - 0.5).abs() < 1e-6);
}

#[test]
fn slide_starts_off_canvas_and_lands_on_target() {
    let left = anim(AnimationKind::Slide(SlideFrom::Left), 0.0);
    assert_eq!(left.pose(0).unwrap().x, -100.0);
    assert_eq!(left.pose(0).unwrap().opacity, 0.0);
    let right = anim(AnimationKind::Slide(SlideFrom::Right), 0.0);
    assert_eq!(right.pose(0).unwrap().x, 200.0);
    let top = anim(AnimationKind::Slide(SlideFrom::Top), 0.0);
    assert_eq!(top.pose(0).unwrap().y, -10.0);
    let bottom = anim(AnimationKind::Slide(SlideFrom::Bottom), 0.0);
    assert_eq!(bottom.pose(0).unwrap().y, 100.0);

    for a in [left, right, top, bottom] {
        let mid = a.pose(4).unwrap();
        assert!(mid.opacity > 0.0);
        let end = a.pose(8).unwrap();
        assert_eq!((end.x, end.y), (50.0, 45.0));
    }
}

#[test]
fn scale_grows_from_thirty_percent_centred() {
    let a = anim(AnimationKind::Scale, 0.0);
    let first = a.pose(0).unwrap();
    assert!((first.scale_x - 0.3).abs() < 1e-9);
    assert_eq!(first.x, 100.0 - 15.0);
    assert_eq!(first.opacity, 0.0);
}

#[test]
fn pop_overshoots_then_settles() {
    let a = anim(AnimationKind::Pop, 0.0);
    // 0.5 s at 10 fps: 5 frames, p = i / 5
    let peak = a.pose(2).unwrap();
    assert!(peak.scale_x > 1.0);
    let settling = a.pose(4).unwrap();
    assert!(settling.scale_x > 1.0 && settling.scale_x < peak.scale_x + 0.2);
    assert_eq!(a.pose(5).unwrap().scale_x, 1.0);
}

#[test]
fn draw_into_matches_frame() {
    let a = anim(AnimationKind::Slide(SlideFrom::Left), 0.0);
    let mut dst = FrameRGBA::transparent(200, 100);
    a.draw_into(&mut dst, 3);
    assert_eq!(dst, a.frame(3));
}
