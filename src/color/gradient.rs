//! Linear color gradients with clamped endpoints.

use bytemuck::{Pod, Zeroable};
use glam::Vec4;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised when building a gradient or its lookup range.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GradientError {
    #[error("Gradient needs at least one color stop")]
    Empty,
    #[error("Gradient stop position {0} must be finite and within [0, 1]")]
    InvalidStop(f32),
    #[error("Degenerate color range: water level ({water}) and peak level ({peak}) must differ and be finite")]
    DegenerateLevels { water: f32, peak: f32 },
}

/// Linear RGBA color with components in `[0, 1]`.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default, Pod, Zeroable, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Opaque color from 8-bit channels.
    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::rgb(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0)
    }

    pub fn to_vec4(self) -> Vec4 {
        Vec4::new(self.r, self.g, self.b, self.a)
    }

    pub fn from_vec4(v: Vec4) -> Self {
        Self { r: v.x, g: v.y, b: v.z, a: v.w }
    }

    pub fn lerp(self, other: Color, t: f32) -> Color {
        Self::from_vec4(self.to_vec4().lerp(other.to_vec4(), t))
    }

    /// Quantizes to 8-bit RGBA, clamping out-of-range channels.
    pub fn to_rgba8(self) -> [u8; 4] {
        let q = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        [q(self.r), q(self.g), q(self.b), q(self.a)]
    }
}

/// A color pinned at a position in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GradientStop {
    pub position: f32,
    pub color: Color,
}

impl GradientStop {
    pub fn new(position: f32, color: Color) -> Self {
        Self { position, color }
    }
}

/// Ordered color stops with linear interpolation between them.
///
/// Lookups before the first stop return the first color, lookups after the
/// last stop return the last color.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "GradientStops")]
pub struct Gradient {
    stops: Vec<GradientStop>,
}

/// Unchecked wire form of [`Gradient`]; deserialization goes through
/// [`Gradient::new`].
#[derive(Deserialize)]
struct GradientStops {
    stops: Vec<GradientStop>,
}

impl TryFrom<GradientStops> for Gradient {
    type Error = GradientError;

    fn try_from(raw: GradientStops) -> Result<Self, Self::Error> {
        Gradient::new(raw.stops)
    }
}

impl Gradient {
    /// Builds a gradient, sorting stops by position.
    pub fn new(mut stops: Vec<GradientStop>) -> Result<Self, GradientError> {
        if stops.is_empty() {
            return Err(GradientError::Empty);
        }
        if let Some(bad) = stops
            .iter()
            .find(|s| !s.position.is_finite() || !(0.0..=1.0).contains(&s.position))
        {
            return Err(GradientError::InvalidStop(bad.position));
        }

        stops.sort_by(|a, b| a.position.total_cmp(&b.position));
        Ok(Self { stops })
    }

    /// Water, beach, grass, rock and snow bands.
    pub fn terrain() -> Self {
        Self {
            stops: vec![
                GradientStop::new(0.0, Color::from_rgb8(38, 84, 160)),
                GradientStop::new(0.06, Color::from_rgb8(214, 196, 140)),
                GradientStop::new(0.2, Color::from_rgb8(86, 152, 62)),
                GradientStop::new(0.55, Color::from_rgb8(58, 104, 44)),
                GradientStop::new(0.8, Color::from_rgb8(122, 112, 104)),
                GradientStop::new(1.0, Color::from_rgb8(245, 247, 250)),
            ],
        }
    }

    pub fn stops(&self) -> &[GradientStop] {
        &self.stops
    }

    /// Color at `t`, clamped into the stop range.
    pub fn evaluate(&self, t: f32) -> Color {
        let first = self.stops[0];
        let last = self.stops[self.stops.len() - 1];

        if t <= first.position {
            return first.color;
        }
        if t >= last.position {
            return last.color;
        }

        for pair in self.stops.windows(2) {
            let (lo, hi) = (pair[0], pair[1]);
            if t <= hi.position {
                let span = hi.position - lo.position;
                if span <= 0.0 {
                    return hi.color;
                }
                return lo.color.lerp(hi.color, (t - lo.position) / span);
            }
        }

        last.color
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);
    const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);

    fn black_to_white() -> Gradient {
        Gradient::new(vec![GradientStop::new(1.0, WHITE), GradientStop::new(0.0, BLACK)]).unwrap()
    }

    #[test]
    fn test_stops_sorted() {
        let g = black_to_white();
        assert_eq!(g.stops()[0].color, BLACK);
        assert_eq!(g.stops()[1].color, WHITE);
    }

    #[test]
    fn test_linear_interpolation() {
        let g = black_to_white();
        let mid = g.evaluate(0.5);
        assert_eq!(mid, Color::rgb(0.5, 0.5, 0.5));
        assert_eq!(g.evaluate(0.25).r, 0.25);
    }

    #[test]
    fn test_endpoints_clamp() {
        let g = Gradient::new(vec![
            GradientStop::new(0.2, BLACK),
            GradientStop::new(0.8, WHITE),
        ])
        .unwrap();

        assert_eq!(g.evaluate(0.0), BLACK);
        assert_eq!(g.evaluate(-3.0), BLACK);
        assert_eq!(g.evaluate(0.9), WHITE);
        assert_eq!(g.evaluate(7.0), WHITE);
        assert!((g.evaluate(0.5).g - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_single_stop() {
        let g = Gradient::new(vec![GradientStop::new(0.5, WHITE)]).unwrap();
        assert_eq!(g.evaluate(0.0), WHITE);
        assert_eq!(g.evaluate(1.0), WHITE);
    }

    #[test]
    fn test_invalid_gradients() {
        assert_eq!(Gradient::new(vec![]), Err(GradientError::Empty));
        assert_eq!(
            Gradient::new(vec![GradientStop::new(1.5, WHITE)]),
            Err(GradientError::InvalidStop(1.5))
        );
        assert!(Gradient::new(vec![GradientStop::new(f32::NAN, WHITE)]).is_err());
    }

    #[test]
    fn test_deserialize_validates() {
        assert!(serde_json::from_str::<Gradient>(r#"{"stops":[]}"#).is_err());
        assert!(serde_json::from_str::<Gradient>(
            r#"{"stops":[{"position":1.5,"color":{"r":0.0,"g":0.0,"b":0.0,"a":1.0}}]}"#
        )
        .is_err());

        let json = r#"{"stops":[
            {"position":1.0,"color":{"r":1.0,"g":1.0,"b":1.0,"a":1.0}},
            {"position":0.0,"color":{"r":0.0,"g":0.0,"b":0.0,"a":1.0}}
        ]}"#;
        let gradient: Gradient = serde_json::from_str(json).unwrap();
        assert_eq!(gradient.stops()[0].position, 0.0);
        assert_eq!(gradient.evaluate(0.0), Color::rgb(0.0, 0.0, 0.0));
    }

    #[test]
    fn test_to_rgba8() {
        assert_eq!(WHITE.to_rgba8(), [255, 255, 255, 255]);
        assert_eq!(Color::rgb(0.5, -1.0, 2.0).to_rgba8(), [128, 0, 255, 255]);
        assert_eq!(Color::from_rgb8(10, 20, 30).to_rgba8(), [10, 20, 30, 255]);
    }

    #[test]
    fn test_terrain_preset_is_valid() {
        let preset = Gradient::terrain();
        assert_eq!(Gradient::new(preset.stops().to_vec()).unwrap(), preset);
    }
}
