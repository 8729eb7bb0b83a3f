use crate::foundation::core::Canvas;
use crate::scene::model::{AxisDef, PositionDef};

/// Vertical anchor for `"top"` as a fraction of frame height.
pub const TOP_FRACTION: f64 = 0.15;
/// Vertical anchor for `"bottom"` as a fraction of frame height.
pub const BOTTOM_FRACTION: f64 = 0.85;

/// One axis of an overlay anchor.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum AxisPos {
    /// Middle of the frame on this axis.
    Center,
    /// Absolute pixel coordinate.
    Pixels(i64),
    /// Fraction of the frame dimension, truncated to whole pixels.
    Fraction(f64),
}

impl AxisPos {
    /// Resolve against a frame dimension.
    pub fn resolve(self, dim: u32) -> i64 {
        match self {
            Self::Center => i64::from(dim / 2),
            Self::Pixels(px) => px,
            Self::Fraction(f) => (f64::from(dim) * f).trunc() as i64,
        }
    }

    fn place(self, dim: u32, extent: u32) -> i64 {
        match self {
            Self::Center => (i64::from(dim) - i64::from(extent)) / 2,
            _ => self.resolve(dim),
        }
    }
}

/// Anchor point of an overlay. Text is centred on the resolved point; images are placed with
/// [`Position::place_box`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Position {
    /// Horizontal anchor.
    pub x: AxisPos,
    /// Vertical anchor.
    pub y: AxisPos,
}

impl Default for Position {
    fn default() -> Self {
        Self::center()
    }
}

impl Position {
    /// Frame centre.
    pub const fn center() -> Self {
        Self {
            x: AxisPos::Center,
            y: AxisPos::Center,
        }
    }

    /// Horizontally centred, near the top edge.
    pub const fn top() -> Self {
        Self {
            x: AxisPos::Center,
            y: AxisPos::Fraction(TOP_FRACTION),
        }
    }

    /// Horizontally centred, near the bottom edge.
    pub const fn bottom() -> Self {
        Self {
            x: AxisPos::Center,
            y: AxisPos::Fraction(BOTTOM_FRACTION),
        }
    }

    /// Pixel coordinates of the anchor on `canvas`.
    pub fn resolve(self, canvas: Canvas) -> (i64, i64) {
        (self.x.resolve(canvas.width), self.y.resolve(canvas.height))
    }

    /// Top-left corner of a `width` x `height` box placed at this position.
    ///
    /// An axis given as `center` centres the box on the frame; any other axis puts the box's
    /// leading edge on the resolved coordinate.
    pub fn place_box(self, canvas: Canvas, width: u32, height: u32) -> (i64, i64) {
        (
            self.x.place(canvas.width, width),
            self.y.place(canvas.height, height),
        )
    }
}

/// Parse a position value. Unrecognized parts fall back to centre and produce a message.
pub(crate) fn parse_position(def: &PositionDef) -> (Position, Vec<String>) {
    let mut notes = Vec::new();
    let pos = match def {
        PositionDef::Named(name) => match name.trim().to_ascii_lowercase().as_str() {
            "center" | "centre" => Position::center(),
            "top" => Position::top(),
            "bottom" => Position::bottom(),
            other => {
                notes.push(format!("unknown position \"{other}\", using center"));
                Position::center()
            }
        },
        PositionDef::Pair([x, y]) => Position {
            x: parse_axis(x, "x", &mut notes),
            y: parse_axis(y, "y", &mut notes),
        },
    };
    (pos, notes)
}

fn parse_axis(def: &AxisDef, axis: &str, notes: &mut Vec<String>) -> AxisPos {
    match def {
        AxisDef::Int(px) => AxisPos::Pixels(*px),
        AxisDef::Float(f) if (0.0..=1.0).contains(f) => AxisPos::Fraction(*f),
        AxisDef::Float(f) if f.is_finite() && *f > 1.0 => AxisPos::Pixels(f.trunc() as i64),
        AxisDef::Text(s) => {
            let t = s.trim();
            if t.eq_ignore_ascii_case("center") || t.eq_ignore_ascii_case("centre") {
                return AxisPos::Center;
            }
            if let Some(pct) = t.strip_suffix('%')
                && let Ok(v) = pct.trim().parse::<f64>()
                && v.is_finite()
            {
                return AxisPos::Fraction(v / 100.0);
            }
            notes.push(format!("unparseable {axis} position \"{s}\", using center"));
            AxisPos::Center
        }
        AxisDef::Float(f) => {
            notes.push(format!("unusable {axis} position {f}, using center"));
            AxisPos::Center
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/position.rs"]
mod tests;
