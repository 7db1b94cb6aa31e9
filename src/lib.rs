//! Streaming polyphase FIR sample-rate converter.
//!
//! Convert PCM audio between arbitrary sample rates using a windowed-sinc
//! polyphase filter bank, in fixed integer or floating-point formats. The
//! design follows a classic five-stage pipeline: a real-valued window
//! (`window`) produces tap weights, `quantize` commits them to the target
//! sample format, `coeffs`/`taps` store and select coefficient rows per
//! output phase, `kernel` runs the inner product, and `history`/`phase`
//! drive the streaming state machine that [`resampler::Resampler`] exposes.
//!
//! ```no_run
//! use polyphase_resample::prelude::*;
//!
//! let mut r: Resampler<f32> = Resampler::new(
//!     Method::Kaiser,
//!     false,
//!     2,
//!     44100,
//!     48000,
//!     ResampleOptions::new(),
//! )?;
//! # Ok::<(), ResampleError>(())
//! ```

pub mod coeffs;
pub mod design;
pub mod error;
pub mod history;
pub mod kernel;
pub mod method;
pub mod options;
pub mod phase;
pub mod quantize;
pub mod resampler;
pub mod sample;
pub mod taps;
pub mod window;

pub mod prelude;
