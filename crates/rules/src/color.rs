//! Color math for the contrast and color-token rules.
//!
//! Channels are linear 0.0–1.0 floats as the scene graph reports them.

use serde::{Deserialize, Serialize};

/// Minimum contrast for normal-size text (WCAG 2.x AA).
pub const WCAG_AA_NORMAL: f64 = 4.5;
/// Minimum contrast for large text.
pub const WCAG_AA_LARGE: f64 = 3.0;
/// Font size at and above which text counts as large.
pub const LARGE_TEXT_SIZE: f64 = 18.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb { r: 0.0, g: 0.0, b: 0.0 };
    pub const WHITE: Rgb = Rgb { r: 1.0, g: 1.0, b: 1.0 };

    pub fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    pub fn luminance(&self) -> f64 {
        relative_luminance(*self)
    }

    pub fn to_hex(&self) -> String {
        rgb_to_hex(*self)
    }
}

/// `#rrggbb`, each channel scaled to 0–255 and rounded.
pub fn rgb_to_hex(color: Rgb) -> String {
    let byte = |v: f64| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
    format!("#{:02x}{:02x}{:02x}", byte(color.r), byte(color.g), byte(color.b))
}

/// WCAG relative luminance.
pub fn relative_luminance(color: Rgb) -> f64 {
    let linear = |c: f64| {
        if c <= 0.03928 {
            c / 12.92
        } else {
            ((c + 0.055) / 1.055).powf(2.4)
        }
    };
    0.2126 * linear(color.r) + 0.7152 * linear(color.g) + 0.0722 * linear(color.b)
}

/// `(lighter + 0.05) / (darker + 0.05)` for two luminances, in either order.
pub fn contrast_ratio(l1: f64, l2: f64) -> f64 {
    let lighter = l1.max(l2);
    let darker = l1.min(l2);
    (lighter + 0.05) / (darker + 0.05)
}

/// Required ratio for text of the given size; unknown sizes count as normal.
pub fn required_ratio(font_size: Option<f64>) -> f64 {
    match font_size {
        Some(size) if size >= LARGE_TEXT_SIZE => WCAG_AA_LARGE,
        _ => WCAG_AA_NORMAL,
    }
}

pub fn passes_wcag_aa(ratio: f64, font_size: Option<f64>) -> bool {
    ratio >= required_ratio(font_size)
}
