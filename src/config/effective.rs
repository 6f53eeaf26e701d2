use std::str::FromStr;

use serde_json::Value;

use crate::animation::ease::Easing;
use crate::config::schema::{OptionMap, default_number};
use crate::foundation::error::{InkError, InkResult};

/// When a segment's reveal animation begins.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub enum AnimationTrigger {
    /// Start as soon as the region is built (after `delay`).
    #[default]
    Load,
    /// Start once the segment's element is at least half visible.
    ScrollIntoView,
}

/// Stroke variant selected by the `drawingMode` option.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DrawingMode {
    /// Sine-perturbed marker lines.
    #[default]
    Highlight,
    /// Looping superellipse outline.
    Circle,
    /// Rays, curves or dot clusters around the box.
    Burst,
    /// Three wavy parallel lines.
    Scribble,
    /// Hand-drawn rectangle.
    Sketchout,
}

impl DrawingMode {
    /// Option value naming this mode.
    pub fn name(self) -> &'static str {
        match self {
            Self::Highlight => "highlight",
            Self::Circle => "circle",
            Self::Burst => "burst",
            Self::Scribble => "scribble",
            Self::Sketchout => "sketchout",
        }
    }
}

impl FromStr for DrawingMode {
    type Err = InkError;

    fn from_str(s: &str) -> InkResult<Self> {
        match s {
            "highlight" => Ok(Self::Highlight),
            "circle" => Ok(Self::Circle),
            "burst" => Ok(Self::Burst),
            "scribble" => Ok(Self::Scribble),
            "sketchout" => Ok(Self::Sketchout),
            other => Err(InkError::construction(format!(
                "unsupported drawing mode '{other}'"
            ))),
        }
    }
}

/// Sub-style of the burst variant.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BurstStyle {
    /// Straight rays.
    #[default]
    Lines,
    /// Quadratic rays bent through a random control point.
    Burst,
    /// Arcs bent perpendicular to the ray.
    Curve,
    /// Dot clusters at concentric distances.
    Cloud,
}

impl BurstStyle {
    fn from_name(name: &str) -> Option<Self> {
        match name {
            "lines" => Some(Self::Lines),
            "burst" => Some(Self::Burst),
            "curve" => Some(Self::Curve),
            "cloud" => Some(Self::Cloud),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
/// Options of the wave highlight (`highlight.*`).
pub struct HighlightOptions {
    /// Maximum endpoint fray, in multiples of 4px.
    pub rough_ends: f64,
    /// Per-line random amplitude variation.
    pub jitter: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
/// Options of the rounded outline (`circle.*`).
pub struct CircleOptions {
    /// 0 is a rounded rectangle, 1 an ellipse.
    pub curve: f64,
    /// Positional wobble strength.
    pub wobble: f64,
    /// Number of times the outline is traced; fractional values trace a partial last loop.
    pub loops: f64,
    /// Base stroke width in pixels.
    pub thickness: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
/// Options of the radiating burst (`burst.*`).
pub struct BurstOptions {
    /// Primitive shape.
    pub style: BurstStyle,
    /// Ray length in multiples of the segment height.
    pub power: f64,
    /// Number of rays or clusters.
    pub count: usize,
    /// Angular and length randomness.
    pub randomness: f64,
    /// Distance from the perimeter in multiples of the segment height.
    pub gap: f64,
}

/// Typed view of a validated option map.
///
/// Built only from the output of [`crate::config::validate_options`], so every field holds a
/// schema-valid value.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EffectiveConfig {
    /// When false every segment is painted complete immediately.
    pub animate: bool,
    /// Full reveal duration in milliseconds.
    pub animation_speed: f64,
    /// Start policy.
    pub animation_trigger: AnimationTrigger,
    /// Height multiplier applied to the segment box.
    pub height: f64,
    /// Vertical shift in half box heights.
    pub offset: f64,
    /// Horizontal overhang in box heights.
    pub padding: f64,
    /// Wave highlight sub-options.
    pub highlight: HighlightOptions,
    /// Rounded outline sub-options.
    pub circle: CircleOptions,
    /// Burst sub-options.
    pub burst: BurstOptions,
    /// Wave length in box heights.
    pub wavelength: f64,
    /// Wave amplitude in tenths of a box height.
    pub amplitude: f64,
    /// Curve applied to reveal progress.
    pub easing: Easing,
    /// Stroke variant.
    pub drawing_mode: DrawingMode,
    /// Outline overlay elements for inspection.
    pub debug: bool,
    /// Horizontal skew in degrees per box height.
    pub skew_x: f64,
    /// Vertical skew in degrees per box height.
    pub skew_y: f64,
    /// Per-line stagger as a fraction of `animation_speed`.
    pub multi_line_delay: f64,
    /// Start delay in milliseconds.
    pub delay: f64,
    /// Seed mixed into every segment's random stream.
    pub seed: u64,
}

impl Default for EffectiveConfig {
    fn default() -> Self {
        let validated = crate::config::schema::validate_options(&OptionMap::new());
        Self::from_validated(&validated.options)
    }
}

struct Reader<'a>(&'a OptionMap);

impl Reader<'_> {
    fn number(&self, key: &str) -> f64 {
        self.0
            .get(key)
            .and_then(Value::as_f64)
            .unwrap_or_else(|| default_number(key, None))
    }

    fn nested_number(&self, key: &str, field: &str) -> f64 {
        self.0
            .get(key)
            .and_then(|v| v.get(field))
            .and_then(Value::as_f64)
            .unwrap_or_else(|| default_number(key, Some(field)))
    }

    fn nested_str(&self, key: &str, field: &str) -> Option<&str> {
        self.0.get(key)?.get(field)?.as_str()
    }

    fn boolean(&self, key: &str, default: bool) -> bool {
        self.0.get(key).and_then(Value::as_bool).unwrap_or(default)
    }

    fn string(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }
}

impl EffectiveConfig {
    pub(crate) fn from_validated(options: &OptionMap) -> Self {
        let r = Reader(options);

        let animation_trigger = match r.string("animationTrigger") {
            Some("scrollIntoView") => AnimationTrigger::ScrollIntoView,
            _ => AnimationTrigger::Load,
        };
        let drawing_mode = r
            .string("drawingMode")
            .and_then(|m| m.parse::<DrawingMode>().ok())
            .unwrap_or_default();

        Self {
            animate: r.boolean("animate", true),
            animation_speed: r.number("animationSpeed"),
            animation_trigger,
            height: r.number("height"),
            offset: r.number("offset"),
            padding: r.number("padding"),
            highlight: HighlightOptions {
                rough_ends: r.nested_number("highlight", "roughEnds"),
                jitter: r.nested_number("highlight", "jitter"),
            },
            circle: CircleOptions {
                curve: r.nested_number("circle", "curve"),
                wobble: r.nested_number("circle", "wobble"),
                loops: r.nested_number("circle", "loops"),
                thickness: r.nested_number("circle", "thickness"),
            },
            burst: BurstOptions {
                style: r
                    .nested_str("burst", "style")
                    .and_then(BurstStyle::from_name)
                    .unwrap_or_default(),
                power: r.nested_number("burst", "power"),
                count: r.nested_number("burst", "count").round().max(0.0) as usize,
                randomness: r.nested_number("burst", "randomness"),
                gap: r.nested_number("burst", "gap"),
            },
            wavelength: r.number("wavelength"),
            amplitude: r.number("amplitude"),
            easing: r
                .string("easing")
                .and_then(Easing::from_name)
                .unwrap_or_default(),
            drawing_mode,
            debug: r.boolean("debug", false),
            skew_x: r.number("skewX"),
            skew_y: r.number("skewY"),
            multi_line_delay: r.number("multiLineDelay"),
            delay: r.number("delay"),
            seed: r.number("seed").round().max(0.0) as u64,
        }
    }

    /// Start delay for the segment at `index`, in milliseconds.
    pub fn start_delay_ms(&self, index: usize) -> f64 {
        self.delay + self.multi_line_delay * index as f64 * self.animation_speed
    }

    /// Segment height after applying the `height` multiplier.
    pub fn effective_height(&self, box_height: f64) -> f64 {
        box_height * self.height
    }
}
