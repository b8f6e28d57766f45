use std::ops::{ Add, Sub, Mul };

use crate::consts::feq;

/// A color.
///
/// Red, green and blue channels, nominally in `[0.0, 1.0]`. Channels are never
/// clamped here; lighting routinely pushes them past `1.0`, and it is up to
/// whoever serializes the color to clamp it into the output range.
///
/// # Examples
///
/// Combining a surface color with a light's color:
///
/// ```
/// # use ray_caster::color::Color;
/// let surface = Color::rgb(1.0, 0.2, 0.4);
/// let light = Color::rgb(0.9, 1.0, 0.1);
/// assert_eq!(surface * light, Color::rgb(0.9, 0.2, 0.04));
/// ```
#[derive(Copy, Clone, Debug, Default)]
pub struct Color {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
}

/// Colors are compared channel by channel, within `FEQ_EPSILON`.
impl PartialEq for Color {
    fn eq(&self, other: &Color) -> bool {
        feq(self.red, other.red) &&
            feq(self.green, other.green) &&
            feq(self.blue, other.blue)
    }
}

impl From<[f64; 3]> for Color {
    fn from(c: [f64; 3]) -> Color {
        Color::rgb(c[0], c[1], c[2])
    }
}

impl Color {
    /// Creates a color with red, green and blue values.
    pub fn rgb(red: f64, green: f64, blue: f64) -> Color {
        Color { red, green, blue }
    }

    /// The color black, also the background for rays that hit nothing.
    pub fn black() -> Color {
        Color::rgb(0.0, 0.0, 0.0)
    }

    /// The color white.
    pub fn white() -> Color {
        Color::rgb(1.0, 1.0, 1.0)
    }

    /// Computes the Hadamard (channel-wise) product of two colors.
    ///
    /// `c1 * c2` does the same thing; this spelling is there for call sites
    /// where the operator would be ambiguous to a reader.
    pub fn hadamard(c1: &Color, c2: &Color) -> Color {
        Color {
            red: c1.red * c2.red,
            green: c1.green * c2.green,
            blue: c1.blue * c2.blue,
        }
    }
}

impl Add<Color> for Color {
    type Output = Color;

    fn add(self, other: Color) -> Self::Output {
        Color {
            red: self.red + other.red,
            green: self.green + other.green,
            blue: self.blue + other.blue,
        }
    }
}

impl Sub<Color> for Color {
    type Output = Color;

    fn sub(self, other: Color) -> Self::Output {
        Color {
            red: self.red - other.red,
            green: self.green - other.green,
            blue: self.blue - other.blue,
        }
    }
}

impl Mul<f64> for Color {
    type Output = Color;

    fn mul(self, other: f64) -> Self::Output {
        Color {
            red: self.red * other,
            green: self.green * other,
            blue: self.blue * other,
        }
    }
}

impl Mul<Color> for f64 {
    type Output = Color;

    fn mul(self, other: Color) -> Self::Output {
        other * self
    }
}

impl Mul<Color> for Color {
    type Output = Color;

    fn mul(self, other: Color) -> Self::Output {
        Color::hadamard(&self, &other)
    }
}

#[test]
fn add_colors() {
    let c1 = Color::rgb(0.9, 0.6, 0.75);
    let c2 = Color::rgb(0.7, 0.1, 0.25);

    assert_eq!(c1 + c2, Color::rgb(1.6, 0.7, 1.0));
}

#[test]
fn subtract_colors() {
    let c1 = Color::rgb(0.9, 0.6, 0.75);
    let c2 = Color::rgb(0.7, 0.1, 0.25);

    assert_eq!(c1 - c2, Color::rgb(0.2, 0.5, 0.5));
}

#[test]
fn scale_color() {
    let c = Color::rgb(0.2, 0.3, 0.4);

    assert_eq!(c * 2.0, Color::rgb(0.4, 0.6, 0.8));
    assert_eq!(2.0 * c, Color::rgb(0.4, 0.6, 0.8));
}

#[test]
fn hadamard_product() {
    let c1 = Color::rgb(1.0, 0.2, 0.4);
    let c2 = Color::rgb(0.9, 1.0, 0.1);

    assert_eq!(Color::hadamard(&c1, &c2), Color::rgb(0.9, 0.2, 0.04));
    assert_eq!(c1 * c2, Color::hadamard(&c2, &c1));
}

#[test]
fn channels_are_not_clamped() {
    let c = Color::white() * 1.9;

    assert_eq!(c, Color::rgb(1.9, 1.9, 1.9));
    assert_eq!(Color::black() - Color::white(), Color::rgb(-1.0, -1.0, -1.0));
}
