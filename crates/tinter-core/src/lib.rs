//! Tinter Core: named color filters for RGBA8 pixel buffers.
//!
//! This crate contains curve construction, the per-pixel grading operations,
//! the filter table, and pipeline evaluation. It performs no I/O and holds
//! no state between calls.

pub mod error;
pub mod grading;
pub mod image;
pub mod math;
pub mod transform;

// Re-exports for convenience.
pub use crate::error::{FilterError, FilterResult};
pub use crate::image::{PixelBuffer, Rgba};
pub use crate::transform::evaluate::{FilterPipeline, PixelOp, apply_filter};
pub use crate::transform::params::{FilterSpec, OperationSpec};
pub use crate::transform::presets::{BUILTIN_FILTERS, FilterTable};
