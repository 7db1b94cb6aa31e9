//! Error types returned by fallible construction and reconfiguration.

use thiserror::Error;

/// Failure constructing or reconfiguring a [`Resampler`](crate::resampler::Resampler).
///
/// Construction and `update` never panic on bad caller input; they reject it
/// here instead and leave any existing instance in its previous, valid state.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResampleError {
    #[error("channel count must be at least 1, got {channels}")]
    InvalidChannelCount { channels: usize },

    #[error("sample rates must be positive, got in_rate={in_rate} out_rate={out_rate}")]
    InvalidRate { in_rate: u32, out_rate: u32 },

    #[error("quality preset must be in 0..=10, got {quality}")]
    InvalidQuality { quality: u8 },

    #[error("invalid value for option `{key}`: {reason}")]
    InvalidOption { key: &'static str, reason: String },
}
