/// Easing curves used to map normalized progress.
///
/// Every curve maps `0 -> 0` and `1 -> 1`. All curves are monotonic except [`Ease::OutBack`],
/// which overshoots past `1.0` before settling.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Ease {
    /// Linear interpolation.
    Linear,
    /// Cubic ease-in/out.
    InOutCubic,
    /// Quadratic ease-in/out.
    InOutQuad,
    /// Cubic ease-out.
    OutCubic,
    /// Cubic ease-in.
    InCubic,
    /// Exponential ease-out.
    OutExpo,
    /// Sinusoidal ease-in/out.
    InOutSine,
    /// Ease-out with overshoot.
    OutBack,
}

const BACK_C1: f64 = 1.70158;
const BACK_C3: f64 = BACK_C1 + 1.0;

impl Ease {
    /// Apply this easing function to normalized progress `t`, clamped to `[0, 1]`.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::InOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(3) / 2.0)
                }
            }
            Self::InOutQuad => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(2) / 2.0)
                }
            }
            Self::OutCubic => 1.0 - (1.0 - t).powi(3),
            Self::InCubic => t * t * t,
            Self::OutExpo => {
                if t >= 1.0 {
                    1.0
                } else {
                    1.0 - 2f64.powf(-10.0 * t)
                }
            }
            Self::InOutSine => -((std::f64::consts::PI * t).cos() - 1.0) / 2.0,
            Self::OutBack => {
                let u = t - 1.0;
                1.0 + BACK_C3 * u.powi(3) + BACK_C1 * u.powi(2)
            }
        }
    }

    /// Look up a curve by its own name (`"ease_out_cubic"`, `"linear"`, ...).
    pub fn from_curve_name(name: &str) -> Option<Self> {
        let key = name.trim().to_ascii_lowercase().replace('-', "_");
        Some(match key.trim_start_matches("ease_") {
            "linear" => Self::Linear,
            "in_out_cubic" => Self::InOutCubic,
            "in_out_quad" => Self::InOutQuad,
            "out_cubic" => Self::OutCubic,
            "in_cubic" => Self::InCubic,
            "out_expo" => Self::OutExpo,
            "in_out_sine" => Self::InOutSine,
            "out_back" => Self::OutBack,
            _ => return None,
        })
    }

    /// Name accepted by [`Ease::from_curve_name`].
    pub fn curve_name(self) -> &'static str {
        match self {
            Self::Linear => "linear",
            Self::InOutCubic => "ease_in_out_cubic",
            Self::InOutQuad => "ease_in_out_quad",
            Self::OutCubic => "ease_out_cubic",
            Self::InCubic => "ease_in_cubic",
            Self::OutExpo => "ease_out_expo",
            Self::InOutSine => "ease_in_out_sine",
            Self::OutBack => "ease_out_back",
        }
    }

    /// Resolve either a preset name or a curve name.
    ///
    /// Unknown names fall back to [`Ease::InOutCubic`] and log a warning.
    pub fn from_preset_name(name: &str) -> Self {
        if let Some(preset) = EasePreset::from_name(name) {
            return preset.ease();
        }
        if let Some(ease) = Self::from_curve_name(name) {
            return ease;
        }
        tracing::warn!(name, "unknown easing preset, using ease_in_out_cubic");
        Self::InOutCubic
    }
}

/// Named easing presets used by the renderers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EasePreset {
    /// Background motion (Ken Burns, parallax).
    Motion,
    /// Zoom effects.
    Zoom,
    /// Text entrance animations.
    Text,
    /// Scene transitions.
    Transition,
    /// Punchy movement with overshoot.
    Dynamic,
}

impl EasePreset {
    /// Curve backing this preset.
    pub fn ease(self) -> Ease {
        match self {
            Self::Motion => Ease::InOutCubic,
            Self::Zoom => Ease::InOutSine,
            Self::Text => Ease::OutCubic,
            Self::Transition => Ease::InOutQuad,
            Self::Dynamic => Ease::OutBack,
        }
    }

    /// Parse a preset name.
    pub fn from_name(name: &str) -> Option<Self> {
        Some(match name.trim().to_ascii_lowercase().as_str() {
            "motion" => Self::Motion,
            "zoom" => Self::Zoom,
            "text" => Self::Text,
            "transition" => Self::Transition,
            "dynamic" => Self::Dynamic,
            _ => return None,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ease.rs"]
mod tests;
