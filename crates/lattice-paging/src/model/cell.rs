//! Row content produced by content providers.

use serde::{Deserialize, Serialize};

/// An RGBA color with components in the 0.0-1.0 range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const BLACK: Color = Color::new(0.0, 0.0, 0.0, 1.0);
    pub const RED: Color = Color::new(1.0, 0.0, 0.0, 1.0);
    pub const GRAY: Color = Color::new(0.5, 0.5, 0.5, 1.0);

    /// Create a new color from RGBA components.
    #[inline]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Create a color from 8-bit RGB components, fully opaque.
    #[inline]
    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::new(
            f32::from(r) / 255.0,
            f32::from(g) / 255.0,
            f32::from(b) / 255.0,
            1.0,
        )
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

/// Horizontal text alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HorizontalAlignment {
    /// Align to the leading edge.
    #[default]
    Left,
    /// Align to the center.
    Center,
    /// Align to the trailing edge.
    Right,
}

/// The materialized content of one row.
///
/// Providers build cells on demand; views do not keep them once the row
/// scrolls away.
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    /// Primary text.
    pub text: String,
    /// Secondary text shown under or beside the primary text.
    pub detail: Option<String>,
    /// Alignment of the primary text.
    pub alignment: HorizontalAlignment,
    /// Color of the primary text.
    pub text_color: Color,
    /// Whether tapping the row selects it.
    pub selectable: bool,
}

impl Cell {
    /// Creates a plain, selectable, left-aligned cell.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            detail: None,
            alignment: HorizontalAlignment::Left,
            text_color: Color::BLACK,
            selectable: true,
        }
    }

    /// Creates the placeholder row shown while a load is running.
    ///
    /// The placeholder is centered, tinted with `color` and never selectable.
    pub fn loading(text: impl Into<String>, color: Color) -> Self {
        Self {
            text: text.into(),
            detail: None,
            alignment: HorizontalAlignment::Center,
            text_color: color,
            selectable: false,
        }
    }

    /// Sets the detail text.
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    /// Sets the text alignment.
    pub fn with_alignment(mut self, alignment: HorizontalAlignment) -> Self {
        self.alignment = alignment;
        self
    }

    /// Sets the text color.
    pub fn with_text_color(mut self, color: Color) -> Self {
        self.text_color = color;
        self
    }

    /// Sets whether the row can be selected.
    pub fn with_selectable(mut self, selectable: bool) -> Self {
        self.selectable = selectable;
        self
    }
}
