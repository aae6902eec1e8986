//! Pipeline evaluation: instantiates a filter and runs it over a buffer.

use std::borrow::Cow;

use crate::error::FilterResult;
use crate::grading::{
    Brightness, ChannelPush, Colorize, Gamma, GreyScale, Saturation, Sepia, ToneCurve,
};
use crate::image::{PixelBuffer, Rgba};
use crate::transform::params::{FilterSpec, OperationSpec};
use crate::transform::presets::FilterTable;

/// An instantiated operation, ready to run per pixel.
#[derive(Debug, Clone)]
pub enum PixelOp {
    Curve(ToneCurve),
    Saturation(Saturation),
    Brightness(Brightness),
    Gamma(Gamma),
    Channels(ChannelPush),
    Sepia(Sepia),
    Colorize(Colorize),
    GreyScale(GreyScale),
}

impl PixelOp {
    /// Build the operation, baking any curve or lookup table it needs.
    pub fn from_spec(spec: &OperationSpec) -> FilterResult<Self> {
        Ok(match spec {
            OperationSpec::Curves(params) => {
                Self::Curve(ToneCurve::new(params.channels, &params.points)?)
            }
            OperationSpec::Saturation { adjust } => Self::Saturation(Saturation::new(*adjust)),
            OperationSpec::Brightness { change } => Self::Brightness(Brightness::new(*change)),
            OperationSpec::Gamma { adjust } => Self::Gamma(Gamma::new(*adjust)),
            OperationSpec::Channels(amounts) => Self::Channels(ChannelPush::new(*amounts)),
            OperationSpec::Sepia { adjust } => Self::Sepia(Sepia::new(*adjust)),
            OperationSpec::Colorize { color, level } => {
                Self::Colorize(Colorize::new(*color, *level))
            }
            OperationSpec::GreyScale => Self::GreyScale(GreyScale),
        })
    }

    #[inline]
    pub fn apply(&self, px: Rgba) -> Rgba {
        match self {
            Self::Curve(op) => op.apply(px),
            Self::Saturation(op) => op.apply(px),
            Self::Brightness(op) => op.apply(px),
            Self::Gamma(op) => op.apply(px),
            Self::Channels(op) => op.apply(px),
            Self::Sepia(op) => op.apply(px),
            Self::Colorize(op) => op.apply(px),
            Self::GreyScale(op) => op.apply(px),
        }
    }
}

/// A filter's operations, instantiated for one request.
#[derive(Debug, Clone, Default)]
pub struct FilterPipeline {
    ops: Vec<PixelOp>,
}

impl FilterPipeline {
    /// Instantiate every operation of `spec` in order.
    ///
    /// The first operation that fails to build aborts the whole pipeline.
    pub fn compile(spec: &FilterSpec) -> FilterResult<Self> {
        let ops = spec
            .operations
            .iter()
            .map(|op| {
                tracing::trace!(kind = op.kind(), "instantiating operation");
                PixelOp::from_spec(op)
            })
            .collect::<FilterResult<Vec<_>>>()?;
        Ok(Self { ops })
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Thread one sample through every operation, first to last.
    #[inline]
    pub fn apply_pixel(&self, px: Rgba) -> Rgba {
        self.ops.iter().fold(px, |px, op| op.apply(px))
    }

    /// Run the pipeline over every pixel into a fresh buffer of the same size.
    ///
    /// Channels are truncated into `u8` on write, see [`Rgba::to_bytes`].
    pub fn apply(&self, input: &PixelBuffer) -> FilterResult<PixelBuffer> {
        let mut output = PixelBuffer::blank(input.width, input.height);
        let src = input.pixels()?;
        for (dst, px) in output.pixels_mut()?.iter_mut().zip(src) {
            *dst = self.apply_pixel(Rgba::from_bytes(*px)).to_bytes();
        }
        Ok(output)
    }
}

/// Apply the filter registered as `name` to `buffer`.
///
/// The name is trimmed and matched case-insensitively. An empty name, an
/// unknown name, or a buffer whose length does not match its dimensions
/// returns the input as-is ([`Cow::Borrowed`]). Otherwise the result is a new
/// buffer; the input is never modified.
pub fn apply_filter<'a>(
    buffer: &'a PixelBuffer,
    name: &str,
    table: &FilterTable,
) -> FilterResult<Cow<'a, PixelBuffer>> {
    let name = name.trim();
    if name.is_empty() {
        tracing::debug!("no filter name, passing buffer through");
        return Ok(Cow::Borrowed(buffer));
    }
    if !buffer.is_valid() {
        tracing::debug!(
            width = buffer.width,
            height = buffer.height,
            len = buffer.data.len(),
            "buffer length does not match dimensions, passing through"
        );
        return Ok(Cow::Borrowed(buffer));
    }
    let Some(spec) = table.get(name) else {
        tracing::debug!(filter = name, "unknown filter, passing buffer through");
        return Ok(Cow::Borrowed(buffer));
    };

    let pipeline = FilterPipeline::compile(spec)?;
    tracing::debug!(
        filter = name,
        operations = pipeline.len(),
        pixels = buffer.pixel_count(),
        "applying filter"
    );
    pipeline.apply(buffer).map(Cow::Owned)
}
