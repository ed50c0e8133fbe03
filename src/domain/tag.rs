use crate::domain::ids::TagId;
use serde::{Deserialize, Serialize};

/// A colored label attached to a task
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub id: TagId,
    pub label: String,
    pub color: String,
}

impl Tag {
    pub fn new(label: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            id: TagId::generate(),
            label: label.into().trim().to_string(),
            color: color.into(),
        }
    }
}

/// A named color offered when creating tags or columns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorPreset {
    pub name: &'static str,
    pub value: &'static str,
}

impl ColorPreset {
    const fn new(name: &'static str, value: &'static str) -> Self {
        Self { name, value }
    }
}

pub const TAG_COLORS: [ColorPreset; 8] = [
    ColorPreset::new("Blue", "bg-blue-500"),
    ColorPreset::new("Green", "bg-green-500"),
    ColorPreset::new("Yellow", "bg-yellow-500"),
    ColorPreset::new("Red", "bg-red-500"),
    ColorPreset::new("Purple", "bg-purple-500"),
    ColorPreset::new("Pink", "bg-pink-500"),
    ColorPreset::new("Orange", "bg-orange-500"),
    ColorPreset::new("Teal", "bg-teal-500"),
];

pub const COLUMN_COLORS: [ColorPreset; 6] = [
    ColorPreset::new("Default", "default"),
    ColorPreset::new("Blue", "blue"),
    ColorPreset::new("Green", "green"),
    ColorPreset::new("Yellow", "yellow"),
    ColorPreset::new("Red", "red"),
    ColorPreset::new("Purple", "purple"),
];

/// Color used for columns created without an explicit choice
pub const DEFAULT_COLUMN_COLOR: &str = COLUMN_COLORS[0].value;

/// Looks up a preset by its display name (case-insensitive)
pub fn find_preset<'a>(presets: &'a [ColorPreset], name: &str) -> Option<&'a ColorPreset> {
    presets.iter().find(|p| p.name.eq_ignore_ascii_case(name))
}
