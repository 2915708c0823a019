// Layout policy tables: one immutable recipe per output kind.

pub mod tables;

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use crate::error::SheetError;
use crate::geometry::Rect;
use crate::geometry::crop::CropSpec;

/// Output kinds the compositor knows how to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
pub enum RecipeKind {
    #[serde(rename = "large-passport-8up")]
    LargePassport8Up,
    #[serde(rename = "small-passport-12up")]
    SmallPassport12Up,
    #[serde(rename = "id-document-pair")]
    IdDocumentPair,
    #[serde(rename = "collage-a4")]
    CollageA4,
}

impl RecipeKind {
    pub const ALL: [RecipeKind; 4] = [
        RecipeKind::LargePassport8Up,
        RecipeKind::SmallPassport12Up,
        RecipeKind::IdDocumentPair,
        RecipeKind::CollageA4,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            RecipeKind::LargePassport8Up => "large-passport-8up",
            RecipeKind::SmallPassport12Up => "small-passport-12up",
            RecipeKind::IdDocumentPair => "id-document-pair",
            RecipeKind::CollageA4 => "collage-a4",
        }
    }

    /// The process-wide recipe for this kind.
    pub fn recipe(self) -> &'static LayoutRecipe {
        tables::recipe(self)
    }

    /// Constraints for the cropper that prepares images for this kind.
    ///
    /// Collages take images as-is and have no crop step.
    pub fn crop_spec(self) -> Option<CropSpec> {
        tables::crop_spec(self)
    }
}

impl fmt::Display for RecipeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identifiers match exactly, the same as in job files.
impl FromStr for RecipeKind {
    type Err = SheetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RecipeKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| SheetError::invalid_recipe(format!("unknown recipe '{s}'")))
    }
}

/// How source images map onto a recipe's cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageBinding {
    /// One image, repeated into every cell.
    Repeat,
    /// One image per cell, in cell order.
    PerCell,
    /// Variable count placed by the collage packer.
    Free,
}

/// Immutable description of one output sheet.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutRecipe {
    pub kind: RecipeKind,
    pub canvas_width: u32,
    pub canvas_height: u32,
    pub cell_width: u32,
    pub cell_height: u32,
    pub rotation_degrees: i32,
    pub binding: ImageBinding,
    pub cells: Vec<Rect>,
}

impl LayoutRecipe {
    /// Number of source images `compose` expects for this recipe.
    pub fn expected_inputs(&self) -> Option<usize> {
        match self.binding {
            ImageBinding::Repeat => Some(1),
            ImageBinding::PerCell => Some(self.cells.len()),
            ImageBinding::Free => None,
        }
    }
}
