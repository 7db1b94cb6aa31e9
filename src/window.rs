//! Window functions (component A): tap weight `w(x)` for each [`Method`] at
//! a real offset `x`, in source-sample units centered on zero.

use crate::method::Method;

/// Zero-order modified Bessel function `I0`, evaluated by the standard
/// series expansion. Used by the Kaiser window.
fn bessel_i0(x: f64) -> f64 {
    let mut sum = 1.0;
    let mut term = 1.0;
    let half_x_sq = (x / 2.0) * (x / 2.0);
    let mut k = 1.0;
    while term > sum * 1e-16 {
        term *= half_x_sq / (k * k);
        sum += term;
        k += 1.0;
        if k > 200.0 {
            break;
        }
    }
    sum
}

/// `sinc(pi * x * fc)`, with the spec's x=0 convention of returning `fc`
/// rather than dividing by zero.
fn windowed_sinc(x: f64, cutoff: f64) -> f64 {
    if x == 0.0 {
        cutoff
    } else {
        let px = std::f64::consts::PI * x * cutoff;
        px.sin() / (std::f64::consts::PI * x)
    }
}

/// Mitchell-Netravali BC-spline basis function, parameterized by `b`, `c`.
fn bc_spline(a: f64, b: f64, c: f64) -> f64 {
    if a < 1.0 {
        ((12.0 - 9.0 * b - 6.0 * c) * a.powi(3)
            + (-18.0 + 12.0 * b + 6.0 * c) * a.powi(2)
            + (6.0 - 2.0 * b))
            / 6.0
    } else if a < 2.0 {
        ((-b - 6.0 * c) * a.powi(3)
            + (6.0 * b + 30.0 * c) * a.powi(2)
            + (-12.0 * b - 48.0 * c) * a
            + (8.0 * b + 24.0 * c))
            / 6.0
    } else {
        0.0
    }
}

/// Evaluate the tap weight for `method` at offset `x`, per spec §4.A.
#[allow(clippy::too_many_arguments)]
pub fn weight(
    method: Method,
    x: f64,
    n_taps: i32,
    cutoff: f64,
    cubic_b: f64,
    cubic_c: f64,
    kaiser_beta: f64,
) -> f64 {
    match method {
        Method::Nearest => {
            if x.abs() < 0.5 {
                1.0
            } else {
                0.0
            }
        }
        Method::Linear => (1.0 - x.abs() / n_taps as f64).max(0.0),
        Method::Cubic => {
            let a = x.abs() * 4.0 / n_taps as f64;
            if a > 2.0 {
                0.0
            } else {
                bc_spline(a, cubic_b, cubic_c)
            }
        }
        Method::BlackmanNuttall => {
            let w = 2.0 * std::f64::consts::PI * x / n_taps as f64 + std::f64::consts::PI;
            let window = 0.3635819 - 0.4891775 * w.cos() + 0.1365995 * (2.0 * w).cos()
                - 0.0106411 * (3.0 * w).cos();
            windowed_sinc(x, cutoff) * window
        }
        Method::Kaiser => {
            let t = (2.0 * x) / n_taps as f64;
            let inner = (1.0 - t * t).max(0.0);
            windowed_sinc(x, cutoff) * bessel_i0(kaiser_beta * inner.sqrt()) / bessel_i0(kaiser_beta)
        }
    }
}

/// Kaiser `n_taps` and `beta` from stop-band attenuation `a_db` and
/// transition bandwidth `tr_bw` (normalized), per spec §4.H step 4.
pub fn kaiser_params(a_db: f64, tr_bw: f64) -> (i32, f64) {
    let beta = if a_db < 21.0 {
        0.0
    } else if a_db <= 50.0 {
        0.5842 * (a_db - 21.0).powf(0.4) + 0.07886 * (a_db - 21.0)
    } else {
        0.1102 * (a_db - 8.7)
    };
    let n_taps = ((a_db - 8.0) / (2.285 * 2.0 * std::f64::consts::PI * tr_bw)) + 1.0;
    (n_taps.ceil() as i32, beta)
}
