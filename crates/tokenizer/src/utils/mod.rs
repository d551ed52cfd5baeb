//! Utility modules for segmentation.

pub mod cache;

pub use cache::{CacheStats, SegmentationCache};
