pub mod compositor;
pub mod config;
pub mod digest;
pub mod error;
pub mod geometry;
pub mod layout;
pub mod pipeline;
pub mod segmentation;
