//! Per-pixel grading operations: curves, sliders, channel pushes and tints.

pub mod channels;
pub mod curves;
pub mod sliders;
pub mod tint;

pub use channels::{ChannelAmounts, ChannelPush};
pub use curves::{ChannelSet, ControlPoint, Curve, ToneCurve, build_curve, cubic_curve};
pub use sliders::{Brightness, Gamma, Saturation};
pub use tint::{Colorize, GreyScale, Sepia, TargetColor};
