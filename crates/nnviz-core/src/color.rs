//! Neuron and connection colors

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Linear RGBA color with channels in 0.0-1.0
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self::rgba(r, g, b, 1.0)
    }

    pub fn from_array(c: [f32; 4]) -> Self {
        Self::rgba(c[0], c[1], c[2], c[3])
    }

    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }

    pub fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    /// True when every channel lies in 0.0-1.0
    pub fn is_normalized(&self) -> bool {
        self.to_array().iter().all(|c| (0.0..=1.0).contains(c))
    }

    /// Convert hue/saturation/value (all 0.0-1.0) to an opaque color
    pub fn from_hsv(h: f32, s: f32, v: f32) -> Self {
        if s == 0.0 {
            return Self::rgb(v, v, v);
        }
        let sector = (h * 6.0).floor();
        let f = h * 6.0 - sector;
        let p = v * (1.0 - s);
        let q = v * (1.0 - s * f);
        let t = v * (1.0 - s * (1.0 - f));
        match (sector as i32).rem_euclid(6) {
            0 => Self::rgb(v, t, p),
            1 => Self::rgb(q, v, p),
            2 => Self::rgb(p, v, t),
            3 => Self::rgb(p, q, v),
            4 => Self::rgb(t, p, v),
            _ => Self::rgb(v, p, q),
        }
    }

    /// Average of the RGB channels of two colors, with the given alpha
    pub fn blend(a: Color, b: Color, alpha: f32) -> Self {
        Self::rgba(
            (a.r + b.r) / 2.0,
            (a.g + b.g) / 2.0,
            (a.b + b.b) / 2.0,
            alpha,
        )
    }

    /// Shift each RGB channel by up to `variance` either way, clamped to 0.0-1.0.
    ///
    /// Alpha is kept.
    pub fn jitter<R: Rng + ?Sized>(self, variance: f32, rng: &mut R) -> Self {
        let mut shift = |c: f32| (c + rng.gen_range(-variance..=variance)).clamp(0.0, 1.0);
        let r = shift(self.r);
        let g = shift(self.g);
        let b = shift(self.b);
        Self::rgba(r, g, b, self.a)
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::rgb(1.0, 1.0, 1.0)
    }
}

impl From<[f32; 4]> for Color {
    fn from(c: [f32; 4]) -> Self {
        Self::from_array(c)
    }
}

impl From<Color> for [f32; 4] {
    fn from(c: Color) -> Self {
        c.to_array()
    }
}

/// How connection curves are colored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionColorMode {
    /// Every connection uses the base color
    #[default]
    Uniform,
    /// Random hue per connection with saturation/value near 0.7/0.8
    Random,
    /// Blend of the two endpoint neurons' colors
    Layer,
}

/// Inputs for connection color selection
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConnectionStyle {
    pub mode: ConnectionColorMode,
    pub base_color: Color,
    pub opacity: f32,
    /// Saturation/value spread in random mode
    pub variance: f32,
}

impl Default for ConnectionStyle {
    fn default() -> Self {
        Self {
            mode: ConnectionColorMode::Uniform,
            base_color: Color::rgb(0.8, 0.8, 0.8),
            opacity: 0.5,
            variance: 0.2,
        }
    }
}

impl ConnectionStyle {
    /// Color for a connection between neurons colored `from` and `to`
    pub fn color<R: Rng + ?Sized>(&self, from: Color, to: Color, rng: &mut R) -> Color {
        match self.mode {
            ConnectionColorMode::Uniform => self.base_color.with_alpha(self.opacity),
            ConnectionColorMode::Random => {
                let hue: f32 = rng.gen();
                let saturation = (0.7 + rng.gen_range(-self.variance..=self.variance)).clamp(0.0, 1.0);
                let value = (0.8 + rng.gen_range(-self.variance..=self.variance)).clamp(0.0, 1.0);
                Color::from_hsv(hue, saturation, value).with_alpha(self.opacity)
            }
            ConnectionColorMode::Layer => Color::blend(from, to, self.opacity),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-6
    }

    #[test]
    fn test_hsv_primaries() {
        assert_eq!(Color::from_hsv(0.0, 1.0, 1.0), Color::rgb(1.0, 0.0, 0.0));
        assert_eq!(Color::from_hsv(0.0, 0.0, 0.4), Color::rgb(0.4, 0.4, 0.4));
        let green = Color::from_hsv(1.0 / 3.0, 1.0, 1.0);
        assert!(close(green.r, 0.0) && close(green.g, 1.0) && close(green.b, 0.0));
        let blue = Color::from_hsv(2.0 / 3.0, 1.0, 0.5);
        assert!(close(blue.r, 0.0) && close(blue.g, 0.0) && close(blue.b, 0.5));
    }

    #[test]
    fn test_layer_mode_blends_endpoints() {
        let style = ConnectionStyle {
            mode: ConnectionColorMode::Layer,
            opacity: 0.25,
            ..Default::default()
        };
        let mut rng = StdRng::seed_from_u64(1);
        let c = style.color(Color::rgb(1.0, 0.0, 0.0), Color::rgb(0.0, 1.0, 0.0), &mut rng);
        assert_eq!(c, Color::rgba(0.5, 0.5, 0.0, 0.25));
    }

    #[test]
    fn test_uniform_mode_uses_opacity() {
        let style = ConnectionStyle {
            base_color: Color::rgba(0.1, 0.2, 0.3, 1.0),
            opacity: 0.4,
            ..Default::default()
        };
        let mut rng = StdRng::seed_from_u64(1);
        let c = style.color(Color::default(), Color::default(), &mut rng);
        assert_eq!(c, Color::rgba(0.1, 0.2, 0.3, 0.4));
    }

    #[test]
    fn test_random_mode_stays_in_range() {
        let style = ConnectionStyle {
            mode: ConnectionColorMode::Random,
            ..Default::default()
        };
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let c = style.color(Color::default(), Color::default(), &mut rng);
            assert!(c.is_normalized());
            assert_eq!(c.a, 0.5);
            // value is at least 0.6, so the brightest channel is too
            assert!(c.r.max(c.g).max(c.b) >= 0.6 - 1e-6);
        }
    }

    #[test]
    fn test_random_mode_reproducible_with_seed() {
        let style = ConnectionStyle {
            mode: ConnectionColorMode::Random,
            ..Default::default()
        };
        let a = style.color(Color::default(), Color::default(), &mut StdRng::seed_from_u64(3));
        let b = style.color(Color::default(), Color::default(), &mut StdRng::seed_from_u64(3));
        assert_eq!(a, b);
    }

    #[test]
    fn test_jitter_clamps_and_keeps_alpha() {
        let mut rng = StdRng::seed_from_u64(11);
        let base = Color::rgba(0.0, 1.0, 0.5, 0.7);
        for _ in 0..100 {
            let c = base.jitter(1.0, &mut rng);
            assert!(c.is_normalized());
            assert_eq!(c.a, 0.7);
        }
        assert_eq!(base.jitter(0.0, &mut rng), base);
    }
}
