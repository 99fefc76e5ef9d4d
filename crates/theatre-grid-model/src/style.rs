//! Cell styling.

use crate::cell::CellKind;
use serde::{Deserialize, Serialize};

const HEADER_BACKGROUND: &str = "#f3f4f6";
const DEFAULT_TEXT_COLOR: &str = "#111827";
const DEFAULT_FONT_FAMILY: &str = "Inter";
const DEFAULT_FONT_SIZE: u32 = 12;

#[derive(Clone, Copy, Debug, Default, Hash, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HAlign {
    #[default]
    Left,
    Center,
    Right,
}

#[derive(Clone, Copy, Debug, Default, Hash, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VAlign {
    Top,
    #[default]
    Middle,
    Bottom,
}

/// Visual style of a cell.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CellStyle {
    pub background: Option<String>,
    pub text_color: String,
    pub font_family: String,
    pub font_size: u32,
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub align: HAlign,
    pub vertical_align: VAlign,
    pub border: bool,
}

impl Default for CellStyle {
    fn default() -> Self {
        Self {
            background: None,
            text_color: DEFAULT_TEXT_COLOR.to_string(),
            font_family: DEFAULT_FONT_FAMILY.to_string(),
            font_size: DEFAULT_FONT_SIZE,
            bold: false,
            italic: false,
            underline: false,
            align: HAlign::Left,
            vertical_align: VAlign::Middle,
            border: true,
        }
    }
}

impl CellStyle {
    /// Document default style for a cell of the given kind.
    pub fn default_for(kind: CellKind) -> CellStyle {
        match kind {
            CellKind::Header => CellStyle {
                background: Some(HEADER_BACKGROUND.to_string()),
                bold: true,
                align: HAlign::Center,
                ..CellStyle::default()
            },
            CellKind::Data | CellKind::Static | CellKind::Merged => CellStyle::default(),
        }
    }

    pub fn apply(&mut self, patch: &StylePatch) {
        if let Some(background) = &patch.background {
            self.background = background.clone();
        }
        if let Some(color) = &patch.text_color {
            self.text_color = color.clone();
        }
        if let Some(family) = &patch.font_family {
            self.font_family = family.clone();
        }
        if let Some(size) = patch.font_size {
            self.font_size = size;
        }
        if let Some(bold) = patch.bold {
            self.bold = bold;
        }
        if let Some(italic) = patch.italic {
            self.italic = italic;
        }
        if let Some(underline) = patch.underline {
            self.underline = underline;
        }
        if let Some(align) = patch.align {
            self.align = align;
        }
        if let Some(valign) = patch.vertical_align {
            self.vertical_align = valign;
        }
        if let Some(border) = patch.border {
            self.border = border;
        }
    }
}

/// Partial style update. Only `Some` fields are written.
///
/// `background: Some(None)` clears the background.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StylePatch {
    pub background: Option<Option<String>>,
    pub text_color: Option<String>,
    pub font_family: Option<String>,
    pub font_size: Option<u32>,
    pub bold: Option<bool>,
    pub italic: Option<bool>,
    pub underline: Option<bool>,
    pub align: Option<HAlign>,
    pub vertical_align: Option<VAlign>,
    pub border: Option<bool>,
}

impl StylePatch {
    pub fn is_empty(&self) -> bool {
        *self == StylePatch::default()
    }
}
