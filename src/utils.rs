use regex::Regex;
use std::sync::OnceLock;

/// Screenshot filename for a target display name
///
/// Lower-cases the name and replaces spaces with hyphens, so
/// `"API Reference"` becomes `audit-api-reference.png`.
pub fn screenshot_filename(name: &str) -> String {
    format!("audit-{}.png", name.to_lowercase().replace(' ', "-"))
}

/// Truncate text to at most `max_chars` characters (not bytes)
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// An sRGB colour as reported by `getComputedStyle`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RgbColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub alpha: f64,
}

/// Luminance where contrast against black and against white is equal
const DARK_LUMINANCE: f64 = 0.179;

impl RgbColor {
    /// Parse `rgb(r, g, b)` / `rgba(r, g, b, a)` in either comma or space syntax
    pub fn parse(css: &str) -> Option<Self> {
        static RGB: OnceLock<Regex> = OnceLock::new();
        let re = RGB.get_or_init(|| {
            Regex::new(
                r"^rgba?\(\s*(\d{1,3})[\s,]+(\d{1,3})[\s,]+(\d{1,3})(?:\s*[,/]\s*([\d.]+))?\s*\)$",
            )
            .expect("colour regex is valid")
        });

        let caps = re.captures(css.trim())?;
        let channel = |i: usize| caps.get(i)?.as_str().parse::<u8>().ok();
        let alpha = match caps.get(4) {
            Some(a) => a.as_str().parse::<f64>().ok()?,
            None => 1.0,
        };

        Some(Self {
            r: channel(1)?,
            g: channel(2)?,
            b: channel(3)?,
            alpha,
        })
    }

    /// WCAG relative luminance in `0.0..=1.0`
    pub fn relative_luminance(&self) -> f64 {
        fn linear(c: u8) -> f64 {
            let c = c as f64 / 255.0;
            if c <= 0.03928 {
                c / 12.92
            } else {
                ((c + 0.055) / 1.055).powf(2.4)
            }
        }
        0.2126 * linear(self.r) + 0.7152 * linear(self.g) + 0.0722 * linear(self.b)
    }

    /// Whether the colour reads as a dark background, i.e. white text would
    /// contrast with it better than black text.
    /// Fully transparent colours are never dark (the canvas shows through).
    pub fn is_dark(&self) -> bool {
        self.alpha > 0.0 && self.relative_luminance() < DARK_LUMINANCE
    }
}
