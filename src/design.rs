//! Control / update (component H): chooses the method's filter parameters,
//! reduces the rate ratio to keep the phase table bounded, and picks
//! FULL vs. INTERPOLATED mode. This is the "designer" — it works purely in
//! real numbers and integer rate arithmetic; it knows nothing about the
//! target sample format.

use crate::error::ResampleError;
use crate::method::{FilterInterpolation, FilterMode, Method};
use crate::options::ResampleOptions;
use crate::window;

const DEFAULT_STOP_ATTENUATION: f64 = 85.0;
const DEFAULT_OVERSAMPLE: i32 = 8;

fn gcd(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        let t = b;
        b = a % b;
        a = t;
    }
    a
}

fn smallest_prime_factor(n: u64) -> Option<u64> {
    if n < 2 {
        return None;
    }
    let mut p = 2u64;
    while p * p <= n {
        if n % p == 0 {
            return Some(p);
        }
        p += 1;
    }
    Some(n)
}

/// Reduce `in_rate`/`out_rate` to lowest terms, then (spec §4.H step 3)
/// either fold `samp_phase` exactly into the reduction (when
/// `max_phase_error` is ~0) or progressively approximate a further
/// reduction while the phase error induced stays under the bound. Returns
/// `(in_rate, out_rate, samp_phase)`.
///
/// The "progressively divide the GCD by its smallest prime factors" wording
/// in the source spec is this crate's least certain corner: read literally
/// it has no effect once `in_rate`/`out_rate` are already coprime. This
/// crate instead treats it as license to keep approximating — trial-divide
/// the *reduced* denominator by its own smallest prime factors, rounding
/// both `out_rate` and `samp_phase` at each step, for as long as the
/// resulting phase error stays under `max_phase_error`. This is the
/// documented Open Question decision recorded in DESIGN.md.
pub fn reduce_rate_ratio(in_rate: u32, out_rate: u32, samp_phase: u32, max_phase_error: f64) -> (u32, u32, u32) {
    let g0 = gcd(in_rate as u64, out_rate as u64);
    let in_r = in_rate as u64 / g0;
    let out_r = out_rate as u64 / g0;
    // samp_phase was already rescaled to the pre-reduction out_rate by the
    // caller; rescale it down to out_r.
    let phase_r = ((samp_phase as u64) * out_r / out_rate.max(1) as u64).min(out_r.saturating_sub(1));

    if max_phase_error.abs() < 1e-9 {
        if phase_r == 0 {
            return (in_r as u32, out_r as u32, 0);
        }
        let g = gcd(out_r, phase_r);
        return ((in_r) as u32, (out_r / g) as u32, (phase_r / g) as u32);
    }

    let mut cur_in = in_r;
    let mut cur_out = out_r;
    let mut cur_phase = phase_r;
    loop {
        let Some(p) = smallest_prime_factor(cur_out) else {
            break;
        };
        if cur_out / p == 0 {
            break;
        }
        let candidate_out = cur_out / p;
        let candidate_in = ((cur_in as f64) / p as f64).round().max(1.0) as u64;
        let candidate_phase = ((cur_phase as f64) / p as f64).round() as u64;
        let before = cur_phase as f64 / cur_out as f64;
        let after = candidate_phase as f64 / candidate_out.max(1) as f64;
        if (before - after).abs() < max_phase_error {
            cur_in = candidate_in;
            cur_out = candidate_out;
            cur_phase = candidate_phase.min(candidate_out.saturating_sub(1));
        } else {
            break;
        }
    }
    (cur_in as u32, cur_out as u32, cur_phase as u32)
}

/// Fully resolved filter design: everything the rest of the crate needs to
/// build coefficient tables and drive the phase engine.
#[derive(Debug, Clone)]
pub struct ResolvedDesign {
    pub method: Method,
    pub n_taps: usize,
    pub cutoff: f64,
    pub cubic_b: f64,
    pub cubic_c: f64,
    pub kaiser_beta: f64,
    pub filter_mode: FilterMode,
    pub filter_interpolation: FilterInterpolation,
    pub oversample: usize,
    pub in_rate: u32,
    pub out_rate: u32,
    pub samp_phase: u32,
    pub samp_inc: u64,
    pub samp_frac: u32,
}

/// Run spec §4.H steps 2-8 (step 1's "adopt old rate" substitution and step
/// 10's history reconciliation are the caller's job, in `resampler.rs`).
pub fn design(
    method: Method,
    options: &ResampleOptions,
    in_rate: u32,
    out_rate: u32,
    old_out_rate: u32,
    old_samp_phase: u32,
) -> Result<ResolvedDesign, ResampleError> {
    if in_rate == 0 || out_rate == 0 {
        return Err(ResampleError::InvalidRate { in_rate, out_rate });
    }
    options.validate()?;

    // Step 2: rescale samp_phase to the new out_rate.
    let rescaled_phase = if old_out_rate > 0 {
        ((old_samp_phase as u64 * out_rate as u64) / old_out_rate as u64) as u32
    } else {
        0
    };

    // Step 3: reduce the rate ratio.
    let max_phase_error = options.max_phase_error.unwrap_or(0.1);
    let (reduced_in, reduced_out, reduced_phase) =
        reduce_rate_ratio(in_rate, out_rate, rescaled_phase, max_phase_error);

    // Step 4: per-method defaults, then downsampling adjustment.
    let defaults = method.defaults();
    let mut cutoff = options.cutoff.unwrap_or(defaults.cutoff);
    let mut n_taps = options.n_taps.unwrap_or(defaults.n_taps).max(2);
    let cubic_b = options.cubic_b.unwrap_or(1.0);
    let cubic_c = options.cubic_c.unwrap_or(0.0);
    let mut kaiser_beta = 0.0;
    let filter_interpolation = options
        .filter_interpolation
        .unwrap_or(defaults.filter_interpolation);

    if method == Method::Kaiser {
        let stop_db = options.stop_attenuation.unwrap_or(DEFAULT_STOP_ATTENUATION);
        let tr_bw = options.transition_bandwidth.unwrap_or(0.1);
        if options.n_taps.is_none() {
            let (kt, kb) = window::kaiser_params(stop_db, tr_bw);
            n_taps = kt.max(2);
            kaiser_beta = kb;
        } else {
            let (_, kb) = window::kaiser_params(stop_db, tr_bw);
            kaiser_beta = kb;
        }
    }

    let downsampling = reduced_out < reduced_in;
    let mut oversample = options.filter_oversample.unwrap_or(DEFAULT_OVERSAMPLE).max(1) as usize;
    let mut mult = filter_interpolation.mult();

    if downsampling {
        let down_factor = options.down_cutoff_factor.unwrap_or(1.0);
        let scale = reduced_out as f64 / reduced_in as f64;
        cutoff *= scale * down_factor;
        n_taps = ((n_taps as f64) * (reduced_in as f64 / reduced_out as f64)).ceil() as i32;
        while (mult * reduced_out as usize) < reduced_in as usize {
            if oversample <= 1 {
                break;
            }
            oversample /= 2;
            mult *= 2;
        }
    }

    // Step 5: round n_taps up to a multiple of 8 when > 4.
    n_taps = n_taps.max(2);
    if n_taps > 4 {
        n_taps = ((n_taps + 7) / 8) * 8;
    }
    if n_taps % 2 != 0 {
        n_taps += 1;
    }

    // Step 6: resolve AUTO filter mode.
    let requested_mode = options.filter_mode.unwrap_or(FilterMode::Auto);
    let filter_mode = match requested_mode {
        FilterMode::Auto => {
            if reduced_out as usize <= oversample {
                FilterMode::Full
            } else {
                FilterMode::Interpolated
            }
        }
        other => other,
    };

    log::debug!(
        "resampler design: method={:?} n_taps={} cutoff={:.4} beta={:.4} mode={:?} interpolation={:?} oversample={} in_rate={} out_rate={}",
        method, n_taps, cutoff, kaiser_beta, filter_mode, filter_interpolation, oversample, reduced_in, reduced_out
    );

    let samp_inc = (reduced_in / reduced_out) as u64;
    let samp_frac = reduced_in % reduced_out;

    Ok(ResolvedDesign {
        method,
        n_taps: n_taps as usize,
        cutoff: cutoff.clamp(0.01, 1.0),
        cubic_b,
        cubic_c,
        kaiser_beta,
        filter_mode,
        filter_interpolation,
        oversample,
        in_rate: reduced_in,
        out_rate: reduced_out,
        samp_phase: reduced_phase,
        samp_inc,
        samp_frac,
    })
}
