use super::*;

fn panel(style: PanelStyle) -> BackgroundPanel {
    BackgroundPanel {
        style,
        opacity: 0.7,
        padding: 20,
    }
}

#[test]
fn panel_color_contrasts_with_text() {
    let light = [TextLine {
        text: "a".into(),
        color: ColorDef::WHITE,
    }];
    let dark = [TextLine {
        text: "a".into(),
        color: ColorDef::rgb(10, 10, 10),
    }];
    assert_eq!(panel_color(&light, false), ColorDef::BLACK);
    assert_eq!(panel_color(&dark, false), ColorDef::WHITE);
    assert_eq!(panel_color(&dark, true), ColorDef::BLACK);
}

#[test]
fn panel_grows_by_twice_the_padding() {
    let text = FrameRGBA::transparent(100, 50);
    let out = compose_panel(&text, &panel(PanelStyle::Banner), ColorDef::BLACK).unwrap();
    assert_eq!((out.width, out.height), (140, 90));
    // int(255 * 0.7) == 178
    assert_eq!(out.pixel(0, 0)[3], 178);
    assert_eq!(out.pixel(139, 89)[3], 178);
}

#[test]
fn box_leaves_half_padding_margin() {
    let text = FrameRGBA::transparent(100, 50);
    let out = compose_panel(&text, &panel(PanelStyle::Box), ColorDef::BLACK).unwrap();
    assert_eq!(out.pixel(5, 5)[3], 0);
    assert_eq!(out.pixel(10, 10)[3], 178);
}

#[test]
fn rounded_corners_are_clear() {
    let text = FrameRGBA::transparent(100, 50);
    let out = compose_panel(&text, &panel(PanelStyle::Rounded), ColorDef::BLACK).unwrap();
    assert_eq!(out.pixel(0, 0)[3], 0);
    assert_eq!(out.pixel(70, 45)[3], 178);
}

#[test]
fn gradient_peaks_at_centre_row() {
    let text = FrameRGBA::transparent(100, 50);
    let out = compose_panel(&text, &panel(PanelStyle::Gradient), ColorDef::BLACK).unwrap();
    let centre = out.pixel(10, 45)[3];
    let edge = out.pixel(10, 1)[3];
    assert!(centre >= 170, "centre alpha {centre}");
    assert!(edge < 20, "edge alpha {edge}");
}

#[test]
fn text_is_pasted_at_padding_offset() {
    let text = FrameRGBA::solid(
        4,
        4,
        crate::foundation::core::Rgba8Premul::from_straight_rgba(255, 0, 0, 255),
    );
    let out = compose_panel(&text, &panel(PanelStyle::Banner), ColorDef::BLACK).unwrap();
    assert_eq!(out.pixel(20, 20), [255, 0, 0, 255]);
    assert_eq!(out.pixel(19, 19)[0], 0);
}
