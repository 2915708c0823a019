use thiserror::Error;

#[derive(Debug, Error)]
pub enum SheetError {
    #[error("Empty input: recipe requires at least one source image")]
    EmptyInput,

    #[error("Dimension mismatch: expected {expected:?}, got {actual:?}")]
    DimensionMismatch {
        expected: (u32, u32),
        actual: (u32, u32),
    },

    #[error("Invalid angle: {0} degrees is not a supported rotation")]
    InvalidAngle(i32),

    #[error("Invalid recipe: {0}")]
    InvalidRecipe(String),

    #[error("Input count mismatch: expected {expected} images, got {actual}")]
    InputCountMismatch { expected: usize, actual: usize },

    #[error("Invalid scale: {0}")]
    InvalidScale(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Segmentation error: {0}")]
    SegmentationError(String),

    #[error("Image error: {0}")]
    ImageError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Generates factory methods for [`SheetError`] variants that wrap a `String`.
macro_rules! error_constructors {
    ($(
        $(#[doc = $doc:expr])*
        $method:ident => $variant:ident
    ),* $(,)?) => {
        impl SheetError {
            $(
                $(#[doc = $doc])*
                pub fn $method(msg: impl Into<String>) -> Self {
                    Self::$variant(msg.into())
                }
            )*
        }
    };
}

error_constructors! {
    /// Create an invalid recipe error.
    invalid_recipe => InvalidRecipe,
    /// Create an invalid scale error.
    invalid_scale => InvalidScale,
    /// Create a configuration error.
    config => ConfigError,
    /// Create a segmentation error.
    segmentation => SegmentationError,
    /// Create an image codec error.
    image => ImageError,
}

impl From<serde_yml::Error> for SheetError {
    fn from(e: serde_yml::Error) -> Self {
        Self::ConfigError(e.to_string())
    }
}

impl From<image::ImageError> for SheetError {
    fn from(e: image::ImageError) -> Self {
        Self::ImageError(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, SheetError>;
