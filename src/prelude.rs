//! Flat re-export surface (spec §2 ambient component M), mirroring the
//! teacher's `prelude` convention: `use polyphase_resample::prelude::*;`
//! pulls in everything a typical caller needs.

pub use crate::error::ResampleError;
pub use crate::method::{FilterInterpolation, FilterMode, Method};
pub use crate::options::ResampleOptions;
pub use crate::resampler::{Resampler, SampleInput, SampleOutput};
pub use crate::sample::{Sample, SampleFormat};
