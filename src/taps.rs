//! Tap selector (component E): for the current phase, returns the
//! coefficient row plus (when interpolating) the interpolation weights.
//!
//! Builds on [`crate::coeffs::CoeffStore`] for storage, [`crate::window`]
//! for the real-valued tap weights and [`crate::quantize`] to commit them to
//! the target format.

use crate::coeffs::CoeffStore;
use crate::method::{FilterInterpolation, Method};
use crate::quantize::{quantize, quantize_with_weight};
use crate::sample::Sample;
use crate::window;

/// Real-valued filter design parameters shared by FULL and INTERPOLATED
/// table construction.
#[derive(Debug, Clone, Copy)]
pub struct TapDesign {
    pub method: Method,
    pub n_taps: usize,
    pub cutoff: f64,
    pub cubic_b: f64,
    pub cubic_c: f64,
    pub kaiser_beta: f64,
}

impl TapDesign {
    /// `n_taps` real tap weights starting at source-sample offset `start_x`.
    fn real_taps(&self, start_x: f64) -> Vec<f64> {
        (0..self.n_taps)
            .map(|j| {
                let x = start_x + j as f64;
                window::weight(
                    self.method,
                    x,
                    self.n_taps as i32,
                    self.cutoff,
                    self.cubic_b,
                    self.cubic_c,
                    self.kaiser_beta,
                )
            })
            .collect()
    }
}

/// One quantized coefficient row plus, in INTERPOLATED mode, the
/// interpolation weight vector to combine partial dot products with.
pub struct TapResult<'a, S: Sample> {
    pub row: &'a [S],
    pub icoeff: [S; 4],
    pub mult: usize,
}

/// FULL mode: one exact quantized row per output phase, computed lazily and
/// memoized (spec §4.E, DESIGN NOTES "array of nullable pointers... never
/// reallocate rows after initial allocation").
pub struct FullTaps<S: Sample> {
    store: CoeffStore<S>,
    computed: Vec<bool>,
}

impl<S: Sample> FullTaps<S> {
    pub fn new() -> Self {
        Self {
            store: CoeffStore::new(),
            computed: Vec::new(),
        }
    }

    pub fn ensure(&mut self, design: &TapDesign, out_rate: u32) {
        self.store.ensure(design.n_taps, 1, out_rate as usize);
        self.computed = vec![false; out_rate as usize];
    }

    /// Invalidate every memoized row without reallocating the backing
    /// store. Spec §9 Open Question: the source zeroes the memo table on
    /// every `update`, even when nothing that would change tap values
    /// changed; this crate preserves that rather than optimizing it away.
    pub fn invalidate(&mut self) {
        for c in self.computed.iter_mut() {
            *c = false;
        }
    }

    /// Return the quantized row for phase `p`, designing and quantizing it
    /// on first use.
    pub fn row(&mut self, p: usize, design: &TapDesign, out_rate: u32) -> &[S] {
        if !self.computed[p] {
            let start_x = 1.0 - design.n_taps as f64 / 2.0 - p as f64 / out_rate as f64;
            let real = design.real_taps(start_x);
            quantize(&real, self.store.row_mut(p));
            self.computed[p] = true;
        }
        self.store.row(p)
    }
}

impl<S: Sample> Default for FullTaps<S> {
    fn default() -> Self {
        Self::new()
    }
}

/// INTERPOLATED mode: `oversample` precomputed rows plus closed-form
/// polynomial interpolation between them (spec §4.E).
pub struct InterpolatedTaps<S: Sample> {
    store: CoeffStore<S>,
    oversample: usize,
    interpolation: FilterInterpolation,
}

impl<S: Sample> InterpolatedTaps<S> {
    pub fn new() -> Self {
        Self {
            store: CoeffStore::new(),
            oversample: 1,
            interpolation: FilterInterpolation::None,
        }
    }

    /// Build the `oversample` rows once, per spec §4.H step 7: compute
    /// `otaps = oversample * n_taps + mult - 1` real taps at
    /// `x = 1 - n_taps / 2`, quantize against `weight / oversample`, then
    /// de-interleave into rows via the layout formula of spec §4.E.
    pub fn build(&mut self, design: &TapDesign, oversample: usize, interpolation: FilterInterpolation) {
        self.oversample = oversample;
        self.interpolation = interpolation;
        let mult = interpolation.mult();
        let n_taps = design.n_taps;
        let otaps_len = oversample * n_taps + mult - 1;

        // Sample the continuous window at oversample*n_taps+mult-1 points,
        // mult-1 of which are "run-off" taps shared across rows.
        let start_x = 1.0 - n_taps as f64 / 2.0;
        let step = 1.0 / oversample as f64;
        let real: Vec<f64> = (0..otaps_len)
            .map(|i| {
                let x = start_x + i as f64 * step;
                window::weight(
                    design.method,
                    x,
                    n_taps as i32,
                    design.cutoff,
                    design.cubic_b,
                    design.cubic_c,
                    design.kaiser_beta,
                )
            })
            .collect();
        let weight: f64 = real.iter().sum::<f64>() / oversample as f64;

        let mut quantized = vec![S::default(); otaps_len];
        quantize_with_weight(&real, weight, &mut quantized);

        self.store.ensure(n_taps, mult, oversample);
        for o in 0..oversample {
            let row = self.store.row_mut(o);
            for j in 0..n_taps {
                for k in 0..mult {
                    let src = o + j * oversample + k;
                    row[j * mult + k] = quantized[src];
                }
            }
        }
    }

    /// Resolve the row and interpolation weights for the current
    /// `samp_phase`, per the closed-form formulas of spec §4.E.
    pub fn lookup(&self, samp_phase: u32, out_rate: u32) -> TapResult<'_, S> {
        let oversample = self.oversample as u64;
        let pos = samp_phase as u64 * oversample;
        let row_index = (oversample - 1).saturating_sub(pos / out_rate as u64) as usize;
        let frac = (pos % out_rate as u64) as u32;
        let icoeff = interpolation_weights::<S>(self.interpolation, frac, out_rate);
        TapResult {
            row: self.store.row(row_index),
            icoeff,
            mult: self.interpolation.mult(),
        }
    }
}

impl<S: Sample> Default for InterpolatedTaps<S> {
    fn default() -> Self {
        Self::new()
    }
}

/// Closed-form interpolation weights for `frac/out_rate` (spec §4.E).
fn interpolation_weights<S: Sample>(
    interpolation: FilterInterpolation,
    frac: u32,
    out_rate: u32,
) -> [S; 4] {
    match interpolation {
        FilterInterpolation::None => [S::default(); 4],
        FilterInterpolation::Linear => {
            if S::IS_INTEGER {
                let m = (1u64 << S::PRECISION) - 1;
                let w0 = (frac as u64 * m) / out_rate as u64;
                let w1 = m - w0;
                let w0 = S::from_scaled_f64(w0 as f64);
                let w1 = S::from_scaled_f64(w1 as f64);
                [w0, w1, w0, w1]
            } else {
                let x = frac as f64 / out_rate as f64;
                let w0 = S::from_scaled_f64(x);
                let w1 = S::from_scaled_f64(1.0 - x);
                [w0, w1, w0, w1]
            }
        }
        FilterInterpolation::Cubic => {
            let x = frac as f64 / out_rate as f64;
            let x2 = x * x;
            let x3 = x2 * x;
            let w0 = (x3 - x) / 6.0;
            let w1 = x + (x2 - x3) / 2.0;
            let w3 = -x / 3.0 + x2 / 2.0 - x3 / 6.0;
            let w2 = 1.0 - w0 - w1 - w3;
            if S::IS_INTEGER {
                let m = (1u64 << S::PRECISION) - 1;
                let q0 = (w0 * m as f64).round() as i64;
                let q1 = (w1 * m as f64).round() as i64;
                let q3 = (w3 * m as f64).round() as i64;
                let q2 = m as i64 - q0 - q1 - q3;
                [
                    S::from_scaled_f64(q0 as f64),
                    S::from_scaled_f64(q1 as f64),
                    S::from_scaled_f64(q2 as f64),
                    S::from_scaled_f64(q3 as f64),
                ]
            } else {
                [
                    S::from_scaled_f64(w0),
                    S::from_scaled_f64(w1),
                    S::from_scaled_f64(w2),
                    S::from_scaled_f64(w3),
                ]
            }
        }
    }
}
