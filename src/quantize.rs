//! Tap quantizer (component B): convert a real-valued tap vector to the
//! target sample format, bias-correcting integer formats so the quantized
//! row sums to exactly unity in fixed point.

use crate::sample::Sample;

/// Quantize `taps` (real-valued, arbitrary scale) into the target format.
///
/// For float formats this simply normalizes by the tap sum. For integer
/// formats it runs the bias-tuning binary search of spec §4.B: find an
/// offset `o` in `[0, 1]` such that `sum(floor(o + t[i] * M / weight)) == M`
/// where `M = (1 << PRECISION) - 1`. If no offset makes the sum exact within
/// 32 iterations, the search result closest to exact is used and a warning
/// is logged (spec §7, "feasibility warning" — not fatal).
pub fn quantize<S: Sample>(taps: &[f64], out: &mut [S]) {
    let weight: f64 = taps.iter().sum();
    quantize_with_weight(taps, weight, out);
}

/// As [`quantize`], but with an explicit normalization `weight` rather than
/// the plain sum of `taps`. INTERPOLATED mode (spec §4.H step 7) quantizes
/// its oversampled tap vector against `weight / oversample` rather than the
/// vector's own sum.
pub fn quantize_with_weight<S: Sample>(taps: &[f64], weight: f64, out: &mut [S]) {
    debug_assert_eq!(taps.len(), out.len());
    if !S::IS_INTEGER {
        for (t, o) in taps.iter().zip(out.iter_mut()) {
            *o = S::from_scaled_f64(t / weight);
        }
        return;
    }

    let m = ((1u64 << S::PRECISION) - 1) as i64;
    let scaled: Vec<f64> = taps.iter().map(|t| t * m as f64 / weight).collect();

    let eval = |o: f64| -> i64 { scaled.iter().map(|t| (o + t).floor() as i64).sum() };

    let mut lo = 0.0f64;
    let mut hi = 1.0f64;
    let mut offset = 0.5f64;
    let mut sum = eval(offset);
    let mut found = sum == m;
    let mut iterations = 0;
    while !found && iterations < 32 {
        if sum < m {
            lo = offset;
        } else {
            hi = offset;
        }
        offset = (lo + hi) / 2.0;
        sum = eval(offset);
        found = sum == m;
        iterations += 1;
    }

    if !found {
        log::warn!(
            "dc-bias search for {} taps at {}-bit precision did not converge after {} iterations (sum={}, target={}); writing taps at offset {:.6}",
            scaled.len(),
            S::PRECISION,
            iterations,
            sum,
            m,
            offset
        );
    }

    for (t, o) in scaled.iter().zip(out.iter_mut()) {
        *o = S::from_scaled_f64((offset + t).floor());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn float_quantization_normalizes_to_unit_sum() {
        let taps = vec![0.5, 0.5, 0.5, 0.5];
        let mut out = [0f32; 4];
        quantize(&taps, &mut out);
        let sum: f32 = out.iter().sum();
        assert!((sum - 1.0).abs() < 1e-6);
    }

    #[test]
    fn integer_quantization_sums_to_unity_fixed_point() {
        let taps = vec![0.1, 0.2, 0.3, 0.25, 0.15];
        let mut out = [0i16; 5];
        quantize(&taps, &mut out);
        let sum: i64 = out.iter().map(|&v| v as i64).sum();
        assert_eq!(sum, (1i64 << 15) - 1);
    }

    #[test]
    fn integer_quantization_handles_symmetric_taps() {
        let taps = vec![-0.1, 0.3, 0.6, 0.3, -0.1];
        let mut out = [0i32; 5];
        quantize(&taps, &mut out);
        let sum: i64 = out.iter().map(|&v| v as i64).sum();
        assert_eq!(sum, (1i64 << 31) - 1);
    }
}
