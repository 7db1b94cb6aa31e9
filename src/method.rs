//! Filter design method and its per-method defaults (spec §3, §4.H, §6).

/// Window method used to design the FIR kernel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Nearest,
    Linear,
    Cubic,
    BlackmanNuttall,
    Kaiser,
}

/// How coefficient rows are stored and addressed (spec §3, §4.E).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterMode {
    /// Choose FULL when `out_rate <= oversample`, else INTERPOLATED.
    Auto,
    /// One exact quantized row per output phase.
    Full,
    /// `oversample` rows plus polynomial interpolation between them.
    Interpolated,
}

/// Interpolation applied between oversampled rows in INTERPOLATED mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterInterpolation {
    None,
    Linear,
    Cubic,
}

impl FilterInterpolation {
    /// Number of coefficient values interleaved per oversample tap (`mult`
    /// in spec §3/§4.E).
    pub fn mult(self) -> usize {
        match self {
            FilterInterpolation::None => 1,
            FilterInterpolation::Linear => 2,
            FilterInterpolation::Cubic => 4,
        }
    }
}

/// Per-method defaults referenced by §4.H step 4 when an option is unset.
pub struct MethodDefaults {
    pub n_taps: i32,
    pub cutoff: f64,
    pub filter_interpolation: FilterInterpolation,
}

impl Method {
    pub fn defaults(self) -> MethodDefaults {
        match self {
            Method::Nearest => MethodDefaults {
                n_taps: 2,
                cutoff: 1.0,
                filter_interpolation: FilterInterpolation::None,
            },
            Method::Linear => MethodDefaults {
                n_taps: 2,
                cutoff: 1.0,
                filter_interpolation: FilterInterpolation::Linear,
            },
            Method::Cubic => MethodDefaults {
                n_taps: 4,
                cutoff: 1.0,
                filter_interpolation: FilterInterpolation::Cubic,
            },
            Method::BlackmanNuttall => MethodDefaults {
                n_taps: 32,
                cutoff: 0.9,
                filter_interpolation: FilterInterpolation::Cubic,
            },
            Method::Kaiser => MethodDefaults {
                // Recomputed from stop-attenuation/transition-bandwidth in
                // design.rs; this is only the fallback when those are also
                // unset.
                n_taps: 32,
                cutoff: 0.95,
                filter_interpolation: FilterInterpolation::Cubic,
            },
        }
    }
}

/// Quality preset tuples for Kaiser: `(cutoff, down_cutoff_factor,
/// stop_attenuation_db, transition_bandwidth)`, indexed 0..=10 (spec §6).
pub const KAISER_QUALITY: [(f64, f64, f64, f64); 11] = [
    (0.860, 0.96, 60.0, 0.200),
    (0.880, 0.97, 65.0, 0.170),
    (0.895, 0.97, 70.0, 0.140),
    (0.910, 0.98, 75.0, 0.110),
    (0.920, 0.98, 80.0, 0.090),
    (0.930, 0.985, 85.0, 0.075),
    (0.940, 0.985, 90.0, 0.065),
    (0.950, 0.99, 95.0, 0.055),
    (0.960, 0.99, 100.0, 0.047),
    (0.970, 0.992, 105.0, 0.040),
    (0.980, 0.994, 110.0, 0.034),
];

/// Quality preset tuples for Blackman-Nuttall: `(n_taps, cutoff)` (spec §6).
pub const BLACKMAN_NUTTALL_QUALITY: [(i32, f64); 11] = [
    (8, 0.77),
    (12, 0.81),
    (16, 0.85),
    (24, 0.88),
    (32, 0.90),
    (48, 0.92),
    (64, 0.935),
    (80, 0.945),
    (96, 0.955),
    (128, 0.965),
    (160, 0.975),
];

/// Oversample per quality level (spec §6).
pub const OVERSAMPLE_QUALITY: [i32; 11] = [4, 4, 4, 8, 8, 16, 16, 16, 16, 32, 32];
