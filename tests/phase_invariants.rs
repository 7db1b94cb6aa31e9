//! Phase bookkeeping stays in range across a long run of calls, for a
//! spread of rate ratios and methods (testable property 1).
use polyphase_resample::prelude::*;

fn run_in_range(method: Method, in_rate: u32, out_rate: u32, calls: usize) {
    let mut r: Resampler<f32> = Resampler::new(method, false, 1, in_rate, out_rate, ResampleOptions::new()).unwrap();
    let input = vec![0.3f32; 2048];
    let mut output = vec![0.0f32; 8192];
    for _ in 0..calls {
        let want = r.get_out_frames(input.len()).min(output.len());
        let produced = r.resample(
            SampleInput::Interleaved(&input),
            input.len(),
            SampleOutput::Interleaved(&mut output[..want]),
            want,
        );
        assert_eq!(produced, want);
        assert!(r.samp_phase() < r.out_rate());
    }
}

#[test]
fn kaiser_upsample_stays_in_range() {
    run_in_range(Method::Kaiser, 44100, 48000, 50);
}

#[test]
fn kaiser_downsample_stays_in_range() {
    run_in_range(Method::Kaiser, 48000, 8000, 50);
}

#[test]
fn nearest_odd_ratio_stays_in_range() {
    run_in_range(Method::Nearest, 44100, 22050, 50);
}

#[test]
fn cubic_prime_ratio_stays_in_range() {
    run_in_range(Method::Cubic, 48000, 48001, 30);
}
