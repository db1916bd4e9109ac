//! Paragraph and text run models.

use serde::{Deserialize, Serialize};

/// Text alignment within a paragraph.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlignment {
    #[default]
    Left,
    Center,
    Right,
}

impl TextAlignment {
    /// Parse an alignment keyword, case-insensitively.
    ///
    /// Anything outside {center, left, right} falls back to `Left`.
    pub fn parse(value: &str) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "center" => TextAlignment::Center,
            "right" => TextAlignment::Right,
            _ => TextAlignment::Left,
        }
    }

    /// The OOXML `w:jc` keyword for this alignment.
    pub fn as_str(&self) -> &'static str {
        match self {
            TextAlignment::Left => "left",
            TextAlignment::Center => "center",
            TextAlignment::Right => "right",
        }
    }
}

/// The single style flag a run can carry.
///
/// A run tracks one flag slot, not independent booleans: bold, italic and
/// underline are mutually exclusive and the last one set wins.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StyleFlag {
    #[default]
    None,
    Bold,
    Italic,
    Underline,
}

impl StyleFlag {
    /// Parse a style keyword, case-insensitively.
    ///
    /// Anything outside {bold, italic, underlined} leaves the run unstyled.
    pub fn parse(value: &str) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "bold" => StyleFlag::Bold,
            "italic" => StyleFlag::Italic,
            "underlined" => StyleFlag::Underline,
            _ => StyleFlag::None,
        }
    }

    /// Check whether no flag is set.
    pub fn is_none(&self) -> bool {
        matches!(self, StyleFlag::None)
    }
}

/// Text style properties for a run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TextStyle {
    /// Font family name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font: Option<String>,

    /// Font size in points
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u32>,

    /// The run's style flag
    #[serde(default, skip_serializing_if = "StyleFlag::is_none")]
    pub flag: StyleFlag,
}

impl TextStyle {
    /// Create a new default style.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a style with a font family and point size.
    pub fn with_font(font: impl Into<String>, size: u32) -> Self {
        Self {
            font: Some(font.into()),
            size: Some(size),
            flag: StyleFlag::None,
        }
    }

    /// Check if the style carries any formatting at all.
    pub fn has_formatting(&self) -> bool {
        self.font.is_some() || self.size.is_some() || !self.flag.is_none()
    }
}

/// A run of text with consistent styling.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TextRun {
    /// The text content
    pub text: String,

    /// Text styling
    #[serde(default, skip_serializing_if = "is_default_style")]
    pub style: TextStyle,
}

fn is_default_style(style: &TextStyle) -> bool {
    *style == TextStyle::default()
}

impl TextRun {
    /// Create a plain text run with no styling.
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: TextStyle::default(),
        }
    }

    /// Create a styled text run.
    pub fn styled(text: impl Into<String>, style: TextStyle) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }

    /// Check if this run is empty.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// A paragraph of text.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Paragraph {
    /// Text runs in this paragraph
    #[serde(default)]
    pub runs: Vec<TextRun>,

    /// Text alignment
    #[serde(default, skip_serializing_if = "is_default_alignment")]
    pub alignment: TextAlignment,

    /// Line spacing multiplier (1.0 = single); absent means the backend
    /// default
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spacing: Option<f64>,
}

fn is_default_alignment(a: &TextAlignment) -> bool {
    *a == TextAlignment::Left
}

impl Paragraph {
    /// Create a new empty paragraph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a paragraph with the given text in a single plain run.
    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            runs: vec![TextRun::plain(text)],
            ..Default::default()
        }
    }

    /// Add a text run to this paragraph.
    pub fn add_run(&mut self, run: TextRun) {
        self.runs.push(run);
    }

    /// Get the plain text content.
    pub fn plain_text(&self) -> String {
        self.runs.iter().map(|r| r.text.as_str()).collect()
    }

    /// Check if this paragraph is empty.
    pub fn is_empty(&self) -> bool {
        self.runs.is_empty() || self.runs.iter().all(|r| r.is_empty())
    }
}
