use super::*;
use crate::foundation::core::Rgba8Premul;
use crate::scene::project::MotionEffectSpec;

const CANVAS: Canvas = Canvas {
    width: 32,
    height: 16,
};

fn solid(w: u32, h: u32, r: u8, g: u8, b: u8) -> Arc<FrameRGBA> {
    Arc::new(FrameRGBA::solid(
        w,
        h,
        Rgba8Premul::from_straight_rgba(r, g, b, 255),
    ))
}

fn clip(layers: Vec<ClipLayer>) -> SceneClip {
    SceneClip {
        id: "s".into(),
        duration: 2.0,
        canvas: CANVAS,
        fps: Fps::integer(10).unwrap(),
        background: ClipBackground::Still {
            image: solid(32, 16, 0, 0, 255),
            motion: MotionEffect::new(MotionEffectSpec::default(), 2.0, CANVAS),
        },
        layers,
    }
}

#[test]
fn static_background_is_copied() {
    let c = clip(Vec::new());
    assert_eq!(c.frame_count(), 20);
    let f = c.frame(7).unwrap();
    assert_eq!(f.pixel(0, 0), [0, 0, 255, 255]);
    assert_eq!(f.pixel(31, 15), [0, 0, 255, 255]);
}

#[test]
fn image_layer_fades_in_and_out() {
    let layer = ImageLayer {
        image: solid(4, 4, 255, 0, 0),
        x: 2,
        y: 2,
        fade_in: true,
        fade_out: true,
    };
    assert_eq!(layer.opacity(0.0, 2.0), 0.0);
    assert_eq!(layer.opacity(0.25, 2.0), 0.5);
    assert_eq!(layer.opacity(1.0, 2.0), 1.0);
    assert_eq!(layer.opacity(2.0, 2.0), 0.0);

    let c = clip(vec![ClipLayer::Image(layer)]);
    assert_eq!(c.frame(0).unwrap().pixel(3, 3), [0, 0, 255, 255]);
    assert_eq!(c.frame(10).unwrap().pixel(3, 3), [255, 0, 0, 255]);
}

#[test]
fn layers_draw_in_order() {
    let below = ImageLayer {
        image: solid(8, 8, 255, 0, 0),
        x: 0,
        y: 0,
        fade_in: false,
        fade_out: false,
    };
    let above = ImageLayer {
        image: solid(4, 4, 0, 255, 0),
        x: 2,
        y: 2,
        fade_in: false,
        fade_out: false,
    };
    let c = clip(vec![ClipLayer::Image(below), ClipLayer::Image(above)]);
    let f = c.frame(0).unwrap();
    assert_eq!(f.pixel(0, 0), [255, 0, 0, 255]);
    assert_eq!(f.pixel(3, 3), [0, 255, 0, 255]);
}
