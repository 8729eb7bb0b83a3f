use super::*;
use crate::scene::project::{BackgroundPanel, PanelStyle};

fn style() -> TextStyle {
    TextStyle {
        font: "Arial".into(),
        size: 40.0,
        bold: true,
        shadow: false,
        outline: false,
        outline_width: 3,
        panel: None,
        multicolor: false,
    }
}

fn line(text: &str) -> TextLine {
    TextLine {
        text: text.into(),
        color: ColorDef::WHITE,
    }
}

const FRAME: Canvas = Canvas {
    width: 1280,
    height: 720,
};

#[test]
fn font_size_scales_with_frame_height() {
    assert_eq!(font_pixel_size(80.0, 720), 120);
    assert_eq!(font_pixel_size(80.0, 864), 144);
    assert_eq!(font_pixel_size(0.0, 720), 1);
}

#[test]
fn wrap_is_greedy_and_keeps_long_words() {
    let measure = |s: &str| s.len() as f64 * 10.0;
    assert_eq!(
        wrap_words("aa bb cc dd", 50.0, measure),
        vec!["aa bb".to_owned(), "cc dd".to_owned()]
    );
    assert_eq!(
        wrap_words("supercalifragilistic ok", 50.0, measure),
        vec!["supercalifragilistic".to_owned(), "ok".to_owned()]
    );
    assert_eq!(wrap_words("   ", 50.0, measure), vec!["   ".to_owned()]);
}

#[test]
fn builtin_face_bounds_include_padding() {
    let fonts = FontBook::empty();
    let mut r = TextRasterizer::new(&fonts);
    let img = r.rasterize(&[line("Hi")], &style(), FRAME).unwrap();
    // size 60, two glyphs of 36 px advance, line height 72
    assert_eq!(img.width, 72 + 80);
    assert_eq!(img.height, 72 + 80);
    assert!(!img.is_fully_transparent());
    let (x0, y0, _, _) = img.opaque_bounds().unwrap();
    assert!(x0 >= 40 && y0 >= 40);
}

#[test]
fn blank_lines_keep_their_slot() {
    let fonts = FontBook::empty();
    let mut r = TextRasterizer::new(&fonts);
    let one = r.rasterize(&[line("A")], &style(), FRAME).unwrap();
    let three = r
        .rasterize(&[line("A"), line(""), line("B")], &style(), FRAME)
        .unwrap();
    assert_eq!(three.height - one.height, 2 * 72);
}

#[test]
fn long_text_wraps_within_frame_width() {
    let fonts = FontBook::empty();
    let mut r = TextRasterizer::new(&fonts);
    let words = vec!["word"; 40].join(" ");
    let img = r.rasterize(&[line(&words)], &style(), FRAME).unwrap();
    assert!(img.width <= (1280.0 * 0.9) as u32 + 80);
    assert!(img.height > 72 + 80);
}

#[test]
fn per_line_colours_are_drawn() {
    let fonts = FontBook::empty();
    let mut r = TextRasterizer::new(&fonts);
    let lines = [
        TextLine {
            text: "AAAA".into(),
            color: ColorDef::rgb(255, 0, 0),
        },
        TextLine {
            text: "AAAA".into(),
            color: ColorDef::rgb(0, 0, 255),
        },
    ];
    let img = r.rasterize(&lines, &style(), FRAME).unwrap();
    let x = i64::from(img.width / 2);
    let row0 = 40 + 36;
    let row1 = 40 + 72 + 36;
    assert_eq!(img.pixel(x - 10, row0)[0], 255);
    assert_eq!(img.pixel(x - 10, row1)[2], 255);
}

#[test]
fn shadow_darkens_below_right() {
    let fonts = FontBook::empty();
    let mut r = TextRasterizer::new(&fonts);
    let plain = r.rasterize(&[line("I")], &style(), FRAME).unwrap();
    let shadowed = r
        .rasterize(
            &[line("I")],
            &TextStyle {
                shadow: true,
                ..style()
            },
            FRAME,
        )
        .unwrap();
    let (_, _, x1, y1) = plain.opaque_bounds().unwrap();
    let (_, _, sx1, sy1) = shadowed.opaque_bounds().unwrap();
    assert!(sx1 > x1 && sy1 > y1);
}

#[test]
fn panel_is_added_around_text() {
    let fonts = FontBook::empty();
    let mut r = TextRasterizer::new(&fonts);
    let bare = r.rasterize(&[line("Hi")], &style(), FRAME).unwrap();
    let with_panel = r
        .rasterize(
            &[line("Hi")],
            &TextStyle {
                panel: Some(BackgroundPanel {
                    style: PanelStyle::Banner,
                    opacity: 0.7,
                    padding: 20,
                }),
                ..style()
            },
            FRAME,
        )
        .unwrap();
    assert_eq!(with_panel.width, bare.width + 40);
    assert_eq!(with_panel.height, bare.height + 40);
    assert_eq!(with_panel.pixel(1, 1)[3], 178);
}
