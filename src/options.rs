//! Options bag (component L / DESIGN NOTES "options bag"): a plain
//! structure of explicitly recognized fields with per-field presence
//! (`Option<T>`), merged into the designer at `update` time (spec §4.H
//! step 4, §6).

use crate::error::ResampleError;
use crate::method::{FilterInterpolation, Method, BLACKMAN_NUTTALL_QUALITY, KAISER_QUALITY, OVERSAMPLE_QUALITY};
use crate::method::FilterMode;

/// Recognized configuration keys (spec §6), each optional.
#[derive(Debug, Clone, Default)]
pub struct ResampleOptions {
    pub cutoff: Option<f64>,
    pub down_cutoff_factor: Option<f64>,
    pub stop_attenuation: Option<f64>,
    pub transition_bandwidth: Option<f64>,
    pub cubic_b: Option<f64>,
    pub cubic_c: Option<f64>,
    pub n_taps: Option<i32>,
    pub filter_mode: Option<FilterMode>,
    pub filter_mode_threshold: Option<i32>,
    pub filter_interpolation: Option<FilterInterpolation>,
    pub filter_oversample: Option<i32>,
    pub max_phase_error: Option<f64>,
}

impl ResampleOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cutoff(mut self, v: f64) -> Self {
        self.cutoff = Some(v);
        self
    }
    pub fn with_down_cutoff_factor(mut self, v: f64) -> Self {
        self.down_cutoff_factor = Some(v);
        self
    }
    pub fn with_stop_attenuation(mut self, v: f64) -> Self {
        self.stop_attenuation = Some(v);
        self
    }
    pub fn with_transition_bandwidth(mut self, v: f64) -> Self {
        self.transition_bandwidth = Some(v);
        self
    }
    pub fn with_cubic_bc(mut self, b: f64, c: f64) -> Self {
        self.cubic_b = Some(b);
        self.cubic_c = Some(c);
        self
    }
    pub fn with_n_taps(mut self, v: i32) -> Self {
        self.n_taps = Some(v);
        self
    }
    pub fn with_filter_mode(mut self, v: FilterMode) -> Self {
        self.filter_mode = Some(v);
        self
    }
    pub fn with_filter_interpolation(mut self, v: FilterInterpolation) -> Self {
        self.filter_interpolation = Some(v);
        self
    }
    pub fn with_filter_oversample(mut self, v: i32) -> Self {
        self.filter_oversample = Some(v);
        self
    }
    pub fn with_max_phase_error(mut self, v: f64) -> Self {
        self.max_phase_error = Some(v);
        self
    }

    /// Build options from a quality preset 0..=10 for the given method, per
    /// the two tables of spec §6. Non-Kaiser/Blackman-Nuttall methods are
    /// unaffected by the preset tables and only receive the shared
    /// `filter_oversample` value.
    pub fn from_quality(method: Method, quality: u8) -> Result<Self, ResampleError> {
        if quality > 10 {
            return Err(ResampleError::InvalidQuality { quality });
        }
        let oversample = OVERSAMPLE_QUALITY[quality as usize];
        let mut options = Self::new().with_filter_oversample(oversample);
        match method {
            Method::Kaiser => {
                let (cutoff, down_factor, stop_db, tr_bw) = KAISER_QUALITY[quality as usize];
                options = options
                    .with_cutoff(cutoff)
                    .with_down_cutoff_factor(down_factor)
                    .with_stop_attenuation(stop_db)
                    .with_transition_bandwidth(tr_bw);
            }
            Method::BlackmanNuttall => {
                let (n_taps, cutoff) = BLACKMAN_NUTTALL_QUALITY[quality as usize];
                options = options.with_n_taps(n_taps).with_cutoff(cutoff);
            }
            _ => {}
        }
        Ok(options)
    }

    pub fn validate(&self) -> Result<(), ResampleError> {
        if let Some(o) = self.filter_oversample {
            if o <= 0 || (o & (o - 1)) != 0 {
                return Err(ResampleError::InvalidOption {
                    key: "filter-oversample",
                    reason: format!("must be a positive power of two, got {o}"),
                });
            }
        }
        if let Some(n) = self.n_taps {
            if n <= 0 {
                return Err(ResampleError::InvalidOption {
                    key: "n-taps",
                    reason: format!("must be positive, got {n}"),
                });
            }
        }
        if let Some(c) = self.cutoff {
            if !(0.0..=1.0).contains(&c) {
                return Err(ResampleError::InvalidOption {
                    key: "cutoff",
                    reason: format!("must be in (0, 1], got {c}"),
                });
            }
        }
        Ok(())
    }
}
