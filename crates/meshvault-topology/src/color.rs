//! Colors and the dashboard palette

/// Color in RGBA (0.0 - 1.0 range)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self::new(r, g, b, 1.0)
    }

    /// Opaque color from hue (degrees), saturation and lightness (0.0 - 1.0)
    pub fn from_hsl(h: f32, s: f32, l: f32) -> Self {
        Self::from_hsla(h, s, l, 1.0)
    }

    pub fn from_hsla(h: f32, s: f32, l: f32, a: f32) -> Self {
        let s = s.clamp(0.0, 1.0);
        let l = l.clamp(0.0, 1.0);
        let chroma = (1.0 - (2.0 * l - 1.0).abs()) * s;
        let sector = h.rem_euclid(360.0) / 60.0;
        let x = chroma * (1.0 - (sector % 2.0 - 1.0).abs());

        let (r, g, b) = match sector as u32 {
            0 => (chroma, x, 0.0),
            1 => (x, chroma, 0.0),
            2 => (0.0, chroma, x),
            3 => (0.0, x, chroma),
            4 => (x, 0.0, chroma),
            _ => (chroma, 0.0, x),
        };
        let m = l - chroma / 2.0;

        Self::new(r + m, g + m, b + m, a.clamp(0.0, 1.0))
    }

    pub fn with_alpha(self, a: f32) -> Self {
        Self { a: a.clamp(0.0, 1.0), ..self }
    }

    pub fn lerp(&self, other: &Color, t: f32) -> Color {
        Color {
            r: self.r + (other.r - self.r) * t,
            g: self.g + (other.g - self.g) * t,
            b: self.b + (other.b - self.b) * t,
            a: self.a + (other.a - self.a) * t,
        }
    }
}

/// Fixed hues used by the topology view
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    /// Active edge gradient, source end
    pub edge_start: Color,
    /// Active edge gradient, destination end
    pub edge_end: Color,
    pub inactive_edge: Color,
    /// Active node fill (alpha is replaced by the glow opacity)
    pub active_node: Color,
    pub inactive_node: Color,
    pub active_border: Color,
    pub inactive_border: Color,
    pub label: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            edge_start: Color::from_hsl(186.0, 1.0, 0.5),
            edge_end: Color::from_hsl(266.0, 0.83, 0.5),
            inactive_edge: Color::from_hsl(0.0, 0.0, 0.5),
            active_node: Color::from_hsl(120.0, 1.0, 0.5),
            inactive_node: Color::from_hsl(0.0, 0.0, 0.5),
            active_border: Color::from_hsl(186.0, 1.0, 0.5),
            inactive_border: Color::from_hsl(0.0, 0.0, 0.3),
            label: Color::from_hsl(210.0, 0.4, 0.98),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    #[test]
    fn test_hsl_primaries() {
        let green = Color::from_hsl(120.0, 1.0, 0.5);
        assert!(close(green.r, 0.0) && close(green.g, 1.0) && close(green.b, 0.0));

        let gray = Color::from_hsl(0.0, 0.0, 0.5);
        assert!(close(gray.r, 0.5) && close(gray.g, 0.5) && close(gray.b, 0.5));
    }

    #[test]
    fn test_hsl_cyan_edge_hue() {
        // hsl(186, 100%, 50%)
        let cyan = Color::from_hsl(186.0, 1.0, 0.5);
        assert!(close(cyan.r, 0.0));
        assert!(close(cyan.g, 0.9));
        assert!(close(cyan.b, 1.0));
    }

    #[test]
    fn test_lerp_endpoints() {
        let palette = Palette::default();
        let a = palette.edge_start;
        let b = palette.edge_end;

        assert_eq!(a.lerp(&b, 0.0), a);
        let end = a.lerp(&b, 1.0);
        assert!(close(end.r, b.r) && close(end.g, b.g) && close(end.b, b.b));
    }

    #[test]
    fn test_with_alpha_clamps() {
        assert_eq!(Color::rgb(1.0, 1.0, 1.0).with_alpha(1.7).a, 1.0);
        assert_eq!(Color::rgb(1.0, 1.0, 1.0).with_alpha(-0.2).a, 0.0);
    }
}
