use super::*;
use crate::scene::project::ZoomDir;

fn fps() -> Fps {
    Fps::integer(10).unwrap()
}

fn input(id: &str, duration_sec: f64, transition: Option<f64>) -> TimelineInput<'_> {
    TimelineInput {
        id,
        duration_sec,
        transition_in: transition.map(|duration| TransitionSpec {
            kind: TransitionKind::Crossfade,
            duration,
        }),
    }
}

#[test]
fn back_to_back_without_transitions() {
    let t = ResolvedTimeline::resolve(&[input("a", 2.0, None), input("b", 3.0, None)], fps()).unwrap();
    assert_eq!(t.entries[1].start_sec, 2.0);
    assert_eq!(t.entries[1].start_frame, 20);
    assert_eq!(t.total_duration_sec, 5.0);
    assert_eq!(t.total_frames, 50);
}

#[test]
fn overlap_law_holds() {
    let scenes = [
        input("a", 4.0, None),
        input("b", 5.0, Some(1.0)),
        input("c", 3.0, Some(0.5)),
    ];
    let t = ResolvedTimeline::resolve(&scenes, fps()).unwrap();
    for w in t.entries.windows(2) {
        let d = w[1].transition_in.map_or(0.0, |x| x.duration_sec);
        assert!((w[1].start_sec - (w[0].end_sec() - d)).abs() < 1e-9);
    }
    assert_eq!(t.total_duration_sec, 10.5);
    assert_eq!(t.total_duration_sec, t.entries[2].end_sec());
}

#[test]
fn transition_clamped_to_half_the_shorter_scene() {
    let t = ResolvedTimeline::resolve(&[input("a", 2.0, None), input("b", 6.0, Some(3.0))], fps())
        .unwrap();
    let tr = t.entries[1].transition_in.unwrap();
    assert_eq!(tr.duration_sec, 1.0);
    assert_eq!(tr.frames, 10);
    assert_eq!(t.entries[1].start_sec, 1.0);
}

#[test]
fn first_scene_transition_is_dropped() {
    let t = ResolvedTimeline::resolve(&[input("a", 2.0, Some(1.0))], fps()).unwrap();
    assert!(t.entries[0].transition_in.is_none());
    assert_eq!(t.total_duration_sec, 2.0);
}

#[test]
fn empty_and_zero_length_are_rejected() {
    assert!(matches!(
        ResolvedTimeline::resolve(&[], fps()),
        Err(ReelError::Validation(_))
    ));
    assert!(matches!(
        ResolvedTimeline::resolve(&[input("a", 0.0, None)], fps()),
        Err(ReelError::Validation(_))
    ));
}

#[test]
fn locate_finds_single_and_overlapping_frames() {
    let scenes = [
        input("a", 2.0, None),
        TimelineInput {
            id: "b",
            duration_sec: 2.0,
            transition_in: Some(TransitionSpec {
                kind: TransitionKind::Zoom(ZoomDir::In),
                duration: 0.5,
            }),
        },
    ];
    let t = ResolvedTimeline::resolve(&scenes, fps()).unwrap();
    assert_eq!(t.total_frames, 35);
    assert_eq!(t.locate(0), FrameSource::Single { entry: 0, local: 0 });
    assert_eq!(t.locate(14), FrameSource::Single { entry: 0, local: 14 });
    match t.locate(17) {
        FrameSource::Transition {
            kind,
            progress,
            outgoing,
            incoming,
        } => {
            assert_eq!(kind, TransitionKind::Zoom(ZoomDir::In));
            assert!((progress - 0.4).abs() < 1e-9);
            assert_eq!(outgoing, (0, 17));
            assert_eq!(incoming, (1, 2));
        }
        other => panic!("expected transition, got {other:?}"),
    }
    assert_eq!(t.locate(20), FrameSource::Single { entry: 1, local: 5 });
    assert_eq!(t.locate(34), FrameSource::Single { entry: 1, local: 19 });
}
