//! Filter definitions, the built-in filter table, and pipeline evaluation.

pub mod evaluate;
pub mod params;
pub mod presets;
