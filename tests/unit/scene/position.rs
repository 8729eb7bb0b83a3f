use super::*;

fn canvas() -> Canvas {
    Canvas {
        width: 1184,
        height: 864,
    }
}

fn parse(json: &str) -> (Position, Vec<String>) {
    let def: PositionDef = serde_json::from_str(json).unwrap();
    parse_position(&def)
}

#[test]
fn center_fraction_and_pixels_agree() {
    let c = canvas();
    let (named, _) = parse(r#""center""#);
    let (frac, _) = parse("[0.5, 0.5]");
    let (px, _) = parse("[592, 432]");
    assert_eq!(named.resolve(c), (592, 432));
    assert_eq!(frac.resolve(c), (592, 432));
    assert_eq!(px.resolve(c), (592, 432));
}

#[test]
fn odd_dimensions_still_agree() {
    let c = Canvas {
        width: 101,
        height: 55,
    };
    assert_eq!(Position::center().resolve(c), (50, 27));
    let (frac, _) = parse("[0.5, 0.5]");
    assert_eq!(frac.resolve(c), (50, 27));
}

#[test]
fn named_top_and_bottom() {
    let c = canvas();
    assert_eq!(parse(r#""top""#).0.resolve(c), (592, 129));
    assert_eq!(parse(r#""bottom""#).0.resolve(c), (592, 734));
}

#[test]
fn percent_strings_and_mixed_axes() {
    let c = canvas();
    let (p, notes) = parse(r#"["25%", "center"]"#);
    assert!(notes.is_empty());
    assert_eq!(p.resolve(c), (296, 432));
}

#[test]
fn garbage_axis_falls_back_to_center_with_note() {
    let (p, notes) = parse(r#"["left-ish", 0.8]"#);
    assert_eq!(p.x, AxisPos::Center);
    assert_eq!(p.y, AxisPos::Fraction(0.8));
    assert_eq!(notes.len(), 1);
}

#[test]
fn large_float_is_pixels() {
    let (p, _) = parse("[300.0, 12]");
    assert_eq!(p.x, AxisPos::Pixels(300));
    assert_eq!(p.y, AxisPos::Pixels(12));
}

#[test]
fn boxes_centre_only_on_center_axes() {
    let c = canvas();
    let (named, _) = parse(r#""center""#);
    assert_eq!(named.place_box(c, 100, 50), (542, 407));
    let (frac, _) = parse("[0.5, 0.5]");
    assert_eq!(frac.place_box(c, 100, 50), (592, 432));
    let (mixed, _) = parse(r#"[40, "center"]"#);
    assert_eq!(mixed.place_box(c, 100, 50), (40, 407));
    assert_eq!(parse(r#""top""#).0.place_box(c, 100, 50), (542, 129));
}
