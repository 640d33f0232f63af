//! Size and color reference data.

use crate::ids::{ColorId, SizeId};
use serde::{Deserialize, Serialize};

/// Which size chart a size belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SizeCategory {
    #[default]
    Clothing,
    Shoes,
    Accessories,
}

impl SizeCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            SizeCategory::Clothing => "clothing",
            SizeCategory::Shoes => "shoes",
            SizeCategory::Accessories => "accessories",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "clothing" => Some(SizeCategory::Clothing),
            "shoes" => Some(SizeCategory::Shoes),
            "accessories" => Some(SizeCategory::Accessories),
            _ => None,
        }
    }
}

/// A size (e.g., "M" in the clothing chart, "42" in the shoes chart).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Size {
    pub id: SizeId,
    pub name: String,
    pub category: SizeCategory,
    /// Position within its chart.
    #[serde(default)]
    pub sort_order: u32,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

impl Size {
    pub fn new(id: SizeId, name: impl Into<String>, category: SizeCategory, sort_order: u32) -> Self {
        Self {
            id,
            name: name.into(),
            category,
            sort_order,
            is_active: true,
        }
    }
}

/// A color swatch.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Color {
    pub id: ColorId,
    pub name: String,
    /// Display color, e.g. `#FF0000`.
    #[serde(default)]
    pub hex_code: Option<String>,
    #[serde(default)]
    pub sort_order: u32,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

impl Color {
    pub fn new(id: ColorId, name: impl Into<String>, sort_order: u32) -> Self {
        Self {
            id,
            name: name.into(),
            hex_code: None,
            sort_order,
            is_active: true,
        }
    }

    pub fn with_hex(mut self, hex_code: impl Into<String>) -> Self {
        self.hex_code = Some(hex_code.into());
        self
    }
}

fn default_true() -> bool {
    true
}

/// The store's size and color lists, kept in display order.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReferenceData {
    #[serde(default)]
    pub sizes: Vec<Size>,
    #[serde(default)]
    pub colors: Vec<Color>,
}

impl ReferenceData {
    /// Build reference data, sorting both lists into display order.
    ///
    /// Sizes sort by chart, then sort order, then name; colors by sort order,
    /// then name.
    pub fn new(mut sizes: Vec<Size>, mut colors: Vec<Color>) -> Self {
        sizes.sort_by(|a, b| {
            (a.category as u8, a.sort_order, &a.name).cmp(&(b.category as u8, b.sort_order, &b.name))
        });
        colors.sort_by(|a, b| (a.sort_order, &a.name).cmp(&(b.sort_order, &b.name)));
        Self { sizes, colors }
    }

    pub fn size(&self, id: SizeId) -> Option<&Size> {
        self.sizes.iter().find(|s| s.id == id)
    }

    pub fn color(&self, id: ColorId) -> Option<&Color> {
        self.colors.iter().find(|c| c.id == id)
    }

    /// Active sizes of one chart, for the admin variant form.
    pub fn sizes_for_category(&self, category: SizeCategory) -> Vec<&Size> {
        self.sizes
            .iter()
            .filter(|s| s.is_active && s.category == category)
            .collect()
    }

    /// Active colors, for the admin variant form.
    pub fn active_colors(&self) -> Vec<&Color> {
        self.colors.iter().filter(|c| c.is_active).collect()
    }
}
