use super::*;
use std::sync::Arc;

use crate::effects::motion::MotionEffect;
use crate::foundation::core::{Fps, Rgba8Premul};
use crate::scene::clip::ClipBackground;
use crate::scene::project::{MotionEffectSpec, TransitionKind};

const CANVAS: Canvas = Canvas {
    width: 8,
    height: 8,
};

fn solid_clip(id: &str, duration: f64, rgb: [u8; 3]) -> SceneClip {
    SceneClip {
        id: id.into(),
        duration,
        canvas: CANVAS,
        fps: Fps::integer(10).unwrap(),
        background: ClipBackground::Still {
            image: Arc::new(FrameRGBA::solid(
                8,
                8,
                Rgba8Premul::from_straight_rgba(rgb[0], rgb[1], rgb[2], 255),
            )),
            motion: MotionEffect::new(MotionEffectSpec::default(), duration, CANVAS),
        },
        layers: Vec::new(),
    }
}

fn crossfade(duration: f64) -> Option<TransitionSpec> {
    Some(TransitionSpec {
        kind: TransitionKind::Crossfade,
        duration,
    })
}

#[test]
fn frames_come_from_the_right_scene() {
    let c = Composer::new(
        vec![
            solid_clip("a", 1.0, [255, 0, 0]),
            solid_clip("b", 1.0, [0, 0, 255]),
        ],
        &[None, None],
        0.0,
        0.0,
    )
    .unwrap();
    assert_eq!(c.timeline().total_frames, 20);
    assert_eq!(c.frame(9).unwrap().pixel(0, 0), [255, 0, 0, 255]);
    assert_eq!(c.frame(10).unwrap().pixel(0, 0), [0, 0, 255, 255]);
    assert!(matches!(c.frame(20), Err(ReelError::Render(_))));
}

#[test]
fn crossfade_mixes_both_scenes() {
    let c = Composer::new(
        vec![
            solid_clip("a", 2.0, [255, 0, 0]),
            solid_clip("b", 2.0, [0, 0, 255]),
        ],
        &[None, crossfade(1.0)],
        0.0,
        0.0,
    )
    .unwrap();
    assert_eq!(c.timeline().total_frames, 30);
    let mid = c.frame(15).unwrap().pixel(4, 4);
    assert!(mid[0] > 0 && mid[2] > 0, "{mid:?}");
    assert_eq!(c.frame(10).unwrap().pixel(4, 4), [255, 0, 0, 255]);
    assert_eq!(c.frame(20).unwrap().pixel(4, 4), [0, 0, 255, 255]);
}

#[test]
fn intro_and_outro_fade_through_black() {
    let c = Composer::new(vec![solid_clip("a", 2.0, [200, 200, 200])], &[None], 1.0, 1.0).unwrap();
    assert_eq!(c.fade_factor(0), 0.0);
    assert!((c.fade_factor(5) - 0.5).abs() < 1e-9);
    assert_eq!(c.fade_factor(10), 1.0);
    assert!((c.fade_factor(19) - 0.1).abs() < 1e-9);

    let first = c.frame(0).unwrap().pixel(0, 0);
    assert_eq!(&first[..3], &[0, 0, 0]);
    assert_eq!(first[3], 255);
    assert_eq!(c.frame(10).unwrap().pixel(0, 0), [200, 200, 200, 255]);
}

#[test]
fn empty_clip_list_is_rejected() {
    assert!(Composer::new(Vec::new(), &[], 0.0, 0.0).is_err());
}
