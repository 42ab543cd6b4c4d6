//! Colors for game elements and placeholders

/// Linear RGBA in 0..1
pub type Color = [f32; 4];

pub const BACKGROUND: Color = [0.53, 0.81, 0.92, 1.0];
pub const PLAYER: Color = [0.9, 0.1, 0.1, 1.0];
pub const STEAM: Color = [1.0, 1.0, 1.0, 1.0];
pub const MEAT: Color = [0.55, 0.27, 0.07, 1.0];
pub const GOOD_FRUIT: Color = [0.5, 0.0, 0.5, 1.0];
pub const BAD_FRUIT: Color = [0.2, 0.5, 0.1, 1.0];
pub const BOSS: Color = [0.4, 0.2, 0.6, 1.0];
pub const BREATH_OUTER: Color = [1.0, 0.35, 0.0, 0.9];
pub const BREATH_INNER: Color = [1.0, 0.85, 0.2, 1.0];
pub const HP_BACK: Color = [0.33, 0.33, 0.33, 1.0];
pub const HP_FILL: Color = [1.0, 0.0, 0.0, 1.0];
pub const OUTLINE: Color = [1.0, 1.0, 1.0, 1.0];
pub const DEBUG_TEXT: Color = [1.0, 0.0, 0.0, 1.0];

/// CSS `rgba()` string for a canvas fill or stroke style
pub fn to_css(color: Color) -> String {
    let [r, g, b, a] = color;
    let channel = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
    format!("rgba({}, {}, {}, {})", channel(r), channel(g), channel(b), a.clamp(0.0, 1.0))
}

/// Same color with a different alpha
pub fn with_alpha(color: Color, alpha: f32) -> Color {
    [color[0], color[1], color[2], alpha]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_css_string() {
        assert_eq!(to_css(OUTLINE), "rgba(255, 255, 255, 1)");
        assert_eq!(to_css([0.0, 0.0, 0.0, 0.5]), "rgba(0, 0, 0, 0.5)");
        assert_eq!(to_css([2.0, -1.0, 0.0, 1.0]), "rgba(255, 0, 0, 1)");
    }

    #[test]
    fn test_with_alpha() {
        assert_eq!(with_alpha(STEAM, 0.25)[3], 0.25);
    }
}
