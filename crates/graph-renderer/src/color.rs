//! RGBA colors used by the vertex color buffers.

/// An RGBA color with `f32` components in the `0.0..=1.0` range.
///
/// Every constructor clamps its input, so malformed colors degrade to the
/// nearest valid color instead of failing:
///
/// ```
/// use graph_renderer::Color;
///
/// let red = Color::rgb(1.0, 0.0, 0.0);
/// let from_bytes = Color::from_rgba_u8(128, 64, 32, 255);
/// let clamped = Color::from_rgba_f64(300.0, -4.0, 12.5, 255.0);
/// assert_eq!(clamped, Color::from_rgba_u8(255, 0, 12, 255));
/// # let _ = (red, from_bytes);
/// ```
///
/// The struct is `#[repr(C)]` and implements `bytemuck::Pod`, so four
/// colors per quad corner can be written straight into a color buffer.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);
    pub const TRANSPARENT: Color = Color::rgba(0.0, 0.0, 0.0, 0.0);

    /// Create a color from RGB components with full opacity.
    ///
    /// `const` constructors do not clamp; use them only with literal values.
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Create a color from RGBA components.
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Create a color from float components, clamping each to `0.0..=1.0`.
    pub fn clamped(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self {
            r: clamp_unit(r),
            g: clamp_unit(g),
            b: clamp_unit(b),
            a: clamp_unit(a),
        }
    }

    /// Create a color from 8-bit RGBA values (`0..=255` mapped to `0.0..=1.0`).
    pub fn from_rgba_u8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
            a: a as f32 / 255.0,
        }
    }

    /// Create a color from 8-bit RGB values with full opacity.
    pub fn from_rgb_u8(r: u8, g: u8, b: u8) -> Self {
        Self::from_rgba_u8(r, g, b, 255)
    }

    /// Create a color from loosely typed channel values in the `0..=255` range.
    ///
    /// Values are floored and clamped to `0..=255`; NaN maps to 0.
    pub fn from_rgba_f64(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self::from_rgba_u8(channel_u8(r), channel_u8(g), channel_u8(b), channel_u8(a))
    }

    /// Create a color from a 24-bit RGB hex value (e.g. `0xFF8800`).
    pub fn from_hex(hex: u32) -> Self {
        let r = ((hex >> 16) & 0xFF) as u8;
        let g = ((hex >> 8) & 0xFF) as u8;
        let b = (hex & 0xFF) as u8;
        Self::from_rgb_u8(r, g, b)
    }

    /// Linearly interpolate every channel toward `other`.
    ///
    /// `t` is clamped; the endpoints return `self` and `other` exactly.
    pub fn lerp(self, other: Color, t: f32) -> Self {
        let t = clamp_unit(t);
        if t <= 0.0 {
            return self;
        }
        if t >= 1.0 {
            return other;
        }
        Self {
            r: self.r + (other.r - self.r) * t,
            g: self.g + (other.g - self.g) * t,
            b: self.b + (other.b - self.b) * t,
            a: self.a + (other.a - self.a) * t,
        }
    }

    /// Composite `top` over this color using `top`'s alpha scaled by `amount`.
    ///
    /// With `amount == 0.0` the result is `self`.
    pub fn blend_over(self, top: Color, amount: f32) -> Self {
        let alpha = clamp_unit(top.a * clamp_unit(amount));
        Self {
            r: top.r * alpha + self.r * (1.0 - alpha),
            g: top.g * alpha + self.g * (1.0 - alpha),
            b: top.b * alpha + self.b * (1.0 - alpha),
            a: alpha + self.a * (1.0 - alpha),
        }
    }

    /// Convert to an `[r, g, b, a]` array.
    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

impl From<[f32; 4]> for Color {
    fn from(arr: [f32; 4]) -> Self {
        Self::clamped(arr[0], arr[1], arr[2], arr[3])
    }
}

impl From<Color> for [f32; 4] {
    fn from(color: Color) -> Self {
        color.to_array()
    }
}

fn clamp_unit(v: f32) -> f32 {
    if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0) }
}

fn channel_u8(v: f64) -> u8 {
    if v.is_nan() {
        0
    } else {
        v.floor().clamp(0.0, 255.0) as u8
    }
}
