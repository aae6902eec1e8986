//! Declarative filter definitions.
//!
//! A [`FilterSpec`] is the ordered list of operations a named filter applies.
//! Each [`OperationSpec`] carries its typed parameters and serializes in the
//! `{ "use": <kind>, "params": { … } }` shape of filter table files.

use serde::{Deserialize, Serialize};

use crate::grading::{ChannelAmounts, ChannelSet, ControlPoint, TargetColor};

/// Parameters of a curve remap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurvesParams {
    /// Channel selector, e.g. `"b"` or `"rgb"`.
    pub channels: ChannelSet,
    /// Two or more control points; the first and last are the endpoints.
    pub points: Vec<ControlPoint>,
}

/// One step of a filter, before instantiation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "use", content = "params", rename_all = "snake_case")]
pub enum OperationSpec {
    /// Bezier curve remap over selected channels.
    Curves(CurvesParams),
    /// Saturation percentage, nominally −100..100.
    Saturation {
        adjust: f64,
    },
    /// Brightness as a fraction, `0.25` = +25%.
    Brightness {
        change: f64,
    },
    /// Exponent applied to normalized channels.
    Gamma {
        adjust: f64,
    },
    /// Per-channel push toward white or black.
    Channels(ChannelAmounts),
    /// Sepia strength, 0..100.
    Sepia {
        adjust: f64,
    },
    /// Blend toward `color` by `level` percent.
    Colorize {
        color: TargetColor,
        level: f64,
    },
    /// Rec. 601 greyscale.
    #[serde(rename = "greyscale")]
    GreyScale,
}

impl OperationSpec {
    /// Short kind label for logs and error messages.
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Curves(_) => "curves",
            Self::Saturation { .. } => "saturation",
            Self::Brightness { .. } => "brightness",
            Self::Gamma { .. } => "gamma",
            Self::Channels(_) => "channels",
            Self::Sepia { .. } => "sepia",
            Self::Colorize { .. } => "colorize",
            Self::GreyScale => "greyscale",
        }
    }

    /// Curve remap over `channels`, points given as `(x, y)` pairs.
    pub fn curves(channels: ChannelSet, points: &[(u8, f64)]) -> Self {
        Self::Curves(CurvesParams {
            channels,
            points: points.iter().copied().map(ControlPoint::from).collect(),
        })
    }
}

/// The ordered operations of one named filter. Immutable configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FilterSpec {
    pub operations: Vec<OperationSpec>,
}

impl FilterSpec {
    pub fn new(operations: Vec<OperationSpec>) -> Self {
        Self { operations }
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }
}

impl From<Vec<OperationSpec>> for FilterSpec {
    fn from(operations: Vec<OperationSpec>) -> Self {
        Self { operations }
    }
}
